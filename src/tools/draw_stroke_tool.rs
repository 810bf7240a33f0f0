use egui::Pos2;

use crate::command::Command;
use crate::document::Document;
use crate::stroke::{MutableStroke, Stroke};

/// Turns pointer drags on the canvas into strokes
#[derive(Default)]
pub struct DrawStrokeTool {
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<MutableStroke>,
}

impl DrawStrokeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    pub fn on_pointer_down(&mut self, pos: Pos2, doc: &Document) {
        // The style is fixed when the stroke starts, so toggling erase
        // mode mid-drag does not split it
        let mut stroke = MutableStroke::new(doc.stroke_style());
        stroke.add_point(pos);
        self.current_stroke = Some(stroke);
    }

    pub fn on_pointer_move(&mut self, pos: Pos2) {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.add_point(pos);
        }
    }

    /// Finish the stroke and produce an AddStroke command for undo/redo
    pub fn on_pointer_up(&mut self) -> Option<Command> {
        let stroke = self.current_stroke.take()?;
        if stroke.points().is_empty() {
            return None;
        }
        Some(Command::AddStroke(stroke.into_stroke()))
    }

    /// Drops the stroke in progress, e.g. when the canvas is reset mid-drag
    pub fn cancel(&mut self) {
        self.current_stroke = None;
    }

    /// The unfinished stroke, for drawing a live preview
    pub fn preview(&self) -> Option<Stroke> {
        self.current_stroke.as_ref().map(MutableStroke::to_stroke)
    }
}

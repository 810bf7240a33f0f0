use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandHistory};
use crate::stroke::{Stroke, StrokeStyle};

/// What the auto-correct cycle needs from a canvas.
pub trait DrawingSurface {
    /// Snapshot of the current strokes, in z-order
    fn export_strokes(&self) -> Vec<Stroke>;

    /// Remove every stroke (undoable)
    fn clear(&mut self);

    /// Remove every stroke and forget the undo/redo history
    fn reset(&mut self);

    /// Append strokes in bulk, outside the undo history
    fn load_strokes(&mut self, strokes: Vec<Stroke>);

    fn undo(&mut self) -> bool;

    fn redo(&mut self) -> bool;

    fn set_erase_mode(&mut self, erase: bool);

    fn set_brush(&mut self, color: Color32, width: f32);

    /// Clear-then-load: the surface ends up holding exactly `strokes`.
    fn replace_strokes(&mut self, strokes: Vec<Stroke>) {
        self.reset();
        self.load_strokes(strokes);
    }
}

/// The strokes on the canvas plus their edit history
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    strokes: Vec<Stroke>,
    brush: StrokeStyle,
    erase_mode: bool,
    #[serde(skip)]
    history: CommandHistory,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            strokes: Vec::new(),
            brush: StrokeStyle::default(),
            erase_mode: false,
            history: CommandHistory::new(),
        }
    }
}

impl Document {
    pub fn new(brush: StrokeStyle) -> Self {
        Self {
            brush,
            ..Self::default()
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Style for a stroke started now
    pub fn stroke_style(&self) -> StrokeStyle {
        if self.erase_mode {
            self.brush.erasing()
        } else {
            self.brush
        }
    }

    pub fn erase_mode(&self) -> bool {
        self.erase_mode
    }

    /// Adds a finished stroke as an undoable edit. Empty strokes are ignored.
    pub fn add_stroke(&mut self, stroke: Stroke) {
        if stroke.is_empty() {
            return;
        }
        self.execute(Command::AddStroke(stroke));
    }

    /// Runs an undoable edit
    pub fn execute(&mut self, command: Command) {
        log::debug!("Executing {}", command.name());
        self.history.execute(command, &mut self.strokes);
    }

    /// Adds a stroke through `points` in the current style
    pub fn add_points(&mut self, points: &[Pos2]) {
        self.add_stroke(Stroke::new(self.stroke_style(), points.to_vec()));
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|stroke| stroke.points().len()).sum()
    }
}

impl DrawingSurface for Document {
    fn export_strokes(&self) -> Vec<Stroke> {
        self.strokes.clone()
    }

    fn clear(&mut self) {
        if self.strokes.is_empty() {
            return;
        }
        let removed = self.strokes.clone();
        self.execute(Command::Clear { removed });
    }

    fn reset(&mut self) {
        self.strokes.clear();
        self.history.clear();
    }

    fn load_strokes(&mut self, strokes: Vec<Stroke>) {
        log::info!("Loading {} strokes onto the canvas", strokes.len());
        self.strokes.extend(strokes.into_iter().filter(|s| !s.is_empty()));
        self.history.clear();
    }

    fn undo(&mut self) -> bool {
        self.history.undo(&mut self.strokes)
    }

    fn redo(&mut self) -> bool {
        self.history.redo(&mut self.strokes)
    }

    fn set_erase_mode(&mut self, erase: bool) {
        self.erase_mode = erase;
    }

    fn set_brush(&mut self, color: Color32, width: f32) {
        self.brush = StrokeStyle::new(color, width);
    }
}

mod history;

pub use history::CommandHistory;

use crate::stroke::Stroke;

/// Undoable edits to the stroke list
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Append a finished stroke
    AddStroke(Stroke),
    /// Remove every stroke; holds what was removed so undo can restore it
    Clear { removed: Vec<Stroke> },
}

impl Command {
    pub fn execute(&self, strokes: &mut Vec<Stroke>) {
        match self {
            Command::AddStroke(stroke) => strokes.push(stroke.clone()),
            Command::Clear { .. } => strokes.clear(),
        }
    }

    pub fn undo(&self, strokes: &mut Vec<Stroke>) {
        match self {
            Command::AddStroke(_) => {
                strokes.pop();
            }
            Command::Clear { removed } => *strokes = removed.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddStroke(_) => "Add Stroke",
            Command::Clear { .. } => "Clear",
        }
    }
}

use super::Command;
use crate::stroke::Stroke;

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a command and record it
    pub fn execute(&mut self, command: Command, strokes: &mut Vec<Stroke>) {
        command.execute(strokes);
        self.undo_stack.push(command);
        self.redo_stack.clear(); // a new edit invalidates the redo branch
    }

    /// Undo the last executed command. Returns false if there was none.
    pub fn undo(&mut self, strokes: &mut Vec<Stroke>) -> bool {
        match self.undo_stack.pop() {
            Some(command) => {
                command.undo(strokes);
                self.redo_stack.push(command);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone command. Returns false if there was none.
    pub fn redo(&mut self, strokes: &mut Vec<Stroke>) -> bool {
        match self.redo_stack.pop() {
            Some(command) => {
                command.execute(strokes);
                self.undo_stack.push(command);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeStyle;
    use egui::Pos2;

    fn dot(x: f32) -> Stroke {
        Stroke::new(StrokeStyle::default(), vec![Pos2::new(x, x)])
    }

    #[test]
    fn test_undo_clear_restores_strokes() {
        let mut strokes = Vec::new();
        let mut history = CommandHistory::new();
        history.execute(Command::AddStroke(dot(1.0)), &mut strokes);
        history.execute(Command::AddStroke(dot(2.0)), &mut strokes);
        history.execute(
            Command::Clear {
                removed: strokes.clone(),
            },
            &mut strokes,
        );
        assert!(strokes.is_empty());

        assert!(history.undo(&mut strokes));
        assert_eq!(strokes, vec![dot(1.0), dot(2.0)]);
        assert!(history.redo(&mut strokes));
        assert!(strokes.is_empty());
    }

    #[test]
    fn test_new_command_drops_redo() {
        let mut strokes = Vec::new();
        let mut history = CommandHistory::new();
        history.execute(Command::AddStroke(dot(1.0)), &mut strokes);
        history.undo(&mut strokes);
        assert!(history.can_redo());

        history.execute(Command::AddStroke(dot(2.0)), &mut strokes);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut strokes));
        assert_eq!(strokes, vec![dot(2.0)]);
    }
}

use super::Command;
use crate::surface::Surface;

/// Default number of commands kept on the undo stack.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Undo/redo stacks of drawing commands.
///
/// Undo replays every remaining command from a baseline, so commands never need an
/// inverse. When the undo stack grows past `max_history`, its oldest command is
/// drawn into the baseline and dropped.
///
/// The manager can be muted with [`disable`](Self::disable): while disabled,
/// [`push`](Self::push) records nothing. Tools mute it for the length of a gesture.
pub struct UndoRedoManager {
    /// Commands that can be undone, most recent last
    undo_stack: Vec<Command>,
    /// Commands that can be redone, most recent last
    redo_stack: Vec<Command>,
    /// Pixels every replay starts from; `None` means a transparent surface
    baseline: Option<Surface>,
    width: u32,
    height: u32,
    max_history: usize,
    enabled: bool,
}

impl std::fmt::Debug for UndoRedoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoRedoManager")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("has_baseline", &self.baseline.is_some())
            .field("max_history", &self.max_history)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl UndoRedoManager {
    /// Creates an empty, enabled history for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            baseline: None,
            width,
            height,
            max_history: DEFAULT_MAX_HISTORY,
            enabled: true,
        }
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.set_max_history(max_history);
        self
    }

    pub fn set_max_history(&mut self, max_history: usize) {
        self.max_history = max_history.max(1);
        while self.undo_stack.len() > self.max_history {
            self.fold_oldest();
        }
        // The next redo is at the end; drop the furthest ones.
        let excess = self.redo_stack.len().saturating_sub(self.max_history);
        self.redo_stack.drain(..excess);
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Records a command that has already been drawn. Returns `false` when the
    /// manager is disabled and nothing was recorded.
    pub fn push(&mut self, command: Command) -> bool {
        if !self.enabled {
            log::debug!("History disabled, dropping {}", command.name());
            return false;
        }
        log::debug!("Pushing {} onto the undo stack", command.name());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.max_history {
            self.fold_oldest();
        }
        true
    }

    /// Undoes the most recent command by redrawing `surface` from the baseline.
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, surface: &mut Surface) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("Undo {}", command.name());
        self.redo_stack.push(command);
        self.replay(surface);
        true
    }

    /// Re-applies the most recently undone command on top of `surface`.
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, surface: &mut Surface) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        log::debug!("Redo {}", command.name());
        command.execute(surface);
        self.undo_stack.push(command);
        true
    }

    /// Resets `surface` to the baseline and draws every undoable command in order.
    pub fn replay(&self, surface: &mut Surface) {
        match &self.baseline {
            Some(baseline) => surface.copy_from(baseline),
            None => surface.clear(),
        }
        for command in &self.undo_stack {
            command.execute(surface);
        }
    }

    pub fn clear_redo_stack(&mut self) {
        self.redo_stack.clear();
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    /// Empties both stacks and drops the baseline, for a new drawing of the given size.
    pub fn clear(&mut self, width: u32, height: u32) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.baseline = None;
        self.width = width;
        self.height = height;
        self.enabled = true;
    }

    /// Empties both stacks and makes `baseline` the starting point of every replay,
    /// used when an existing drawing is opened.
    pub fn reset_to(&mut self, baseline: Surface) {
        self.clear(baseline.width(), baseline.height());
        self.baseline = Some(baseline);
    }

    fn fold_oldest(&mut self) {
        if self.undo_stack.is_empty() {
            return;
        }
        let oldest = self.undo_stack.remove(0);
        let baseline = match self.baseline.take() {
            Some(surface) => Some(surface),
            None => match Surface::new(self.width, self.height) {
                Ok(surface) => Some(surface),
                Err(err) => {
                    log::warn!("Cannot allocate history baseline: {err}");
                    None
                }
            },
        };
        if let Some(mut baseline) = baseline {
            oldest.execute(&mut baseline);
            self.baseline = Some(baseline);
        }
        log::debug!("Folded {} into the history baseline", oldest.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RectangleCommand;
    use crate::style::{Style, TraceType};
    use egui::{Color32, pos2};

    fn filled_rect(x: f32) -> Command {
        let style = Style::new(Color32::RED, 1.0).with_trace(TraceType::Filled);
        RectangleCommand::new(style)
            .with_corners(pos2(x, 0.0), pos2(x + 1.0, 1.0))
            .into()
    }

    fn draw_and_push(history: &mut UndoRedoManager, surface: &mut Surface, command: Command) {
        command.execute(surface);
        history.push(command);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = UndoRedoManager::new(4, 4);
        let mut surface = Surface::new(4, 4).unwrap();
        assert!(!history.undo(&mut surface));
        assert!(!history.redo(&mut surface));
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn test_disabled_manager_records_nothing() {
        let mut history = UndoRedoManager::new(4, 4);
        history.disable();
        assert!(!history.push(filled_rect(0.0)));
        assert!(!history.can_undo());
        history.enable();
        assert!(history.push(filled_rect(0.0)));
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = UndoRedoManager::new(4, 4);
        let mut surface = Surface::new(4, 4).unwrap();
        draw_and_push(&mut history, &mut surface, filled_rect(0.0));
        history.undo(&mut surface);
        assert!(history.can_redo());
        draw_and_push(&mut history, &mut surface, filled_rect(1.0));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_overflow_folds_into_baseline() {
        let mut history = UndoRedoManager::new(4, 1).with_max_history(2);
        let mut surface = Surface::new(4, 1).unwrap();
        for x in 0..3 {
            draw_and_push(&mut history, &mut surface, filled_rect(x as f32));
        }
        assert_eq!(history.undo_len(), 2);

        history.undo(&mut surface);
        history.undo(&mut surface);
        assert!(!history.can_undo());
        // The folded first rectangle survives undoing everything that is left.
        assert_eq!(surface.pixel(0, 0), Some(Color32::RED));
        assert_eq!(surface.pixel(1, 0), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_shrinking_history_keeps_next_redo() {
        let mut history = UndoRedoManager::new(4, 1);
        let mut surface = Surface::new(4, 1).unwrap();
        for x in 0..3 {
            draw_and_push(&mut history, &mut surface, filled_rect(x as f32));
        }
        while history.undo(&mut surface) {}

        history.set_max_history(1);
        assert_eq!(history.redo_len(), 1);
        assert!(history.redo(&mut surface));
        assert_eq!(surface.pixel(0, 0), Some(Color32::RED));
        assert_eq!(surface.pixel(2, 0), Some(Color32::TRANSPARENT));
        assert!(!history.can_redo());
    }
}

use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{DocumentEvent, EditorEvent, EventHandler};

/// Writes every event to the log.
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::DocumentChanged(
                DocumentEvent::SaveFailed { message } | DocumentEvent::DeleteFailed { message },
            ) => log::warn!("{message}"),
            EditorEvent::ToolChanged { old, new } => {
                log::info!("Tool changed from {} to {}", old.label(), new.label())
            }
            other => log::debug!("{other:?}"),
        }
    }
}

/// Keeps a copy of every event. The shared buffer can be read while the recorder
/// itself is owned by the bus.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<EditorEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<EditorEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventHandler for EventRecorder {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.lock().push(event.clone());
    }
}

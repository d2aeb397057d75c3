use std::cell::RefCell;

use crate::event::{EditorEvent, EventHandler};

/// Broadcasts editor events to registered handlers, in subscription order.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handler_count()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.try_borrow().map(|h| h.len()).unwrap_or(0)
    }

    /// Delivers `event` to every handler. An event emitted from inside a handler
    /// is dropped with a warning.
    pub fn emit(&self, event: EditorEvent) {
        match self.handlers.try_borrow_mut() {
            Ok(mut handlers) => {
                for handler in handlers.iter_mut() {
                    handler.handle_event(&event);
                }
            }
            Err(_) => log::warn!("Dropping re-entrant event {event:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventRecorder;

    #[test]
    fn test_every_handler_receives_events() {
        let bus = EventBus::new();
        let first = EventRecorder::new();
        let second = EventRecorder::new();
        bus.subscribe(Box::new(first.clone()));
        bus.subscribe(Box::new(second.clone()));

        bus.emit(EditorEvent::ClipboardChanged);
        assert_eq!(first.events(), vec![EditorEvent::ClipboardChanged]);
        assert_eq!(second.take(), vec![EditorEvent::ClipboardChanged]);
        assert!(second.events().is_empty());
        assert_eq!(bus.handler_count(), 2);
    }
}

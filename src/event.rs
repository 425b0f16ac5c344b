use std::sync::mpsc;

use crate::session::controller::InputStatus;
use crate::session::text::TimeLimit;

/// Notification emitted by the controller after each mutation, so observers
/// can track session state without polling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    StatusChanged(InputStatus),
    TimeLimitChanged(TimeLimit),
    CursorMoved(usize),
    WordReceived(usize),
    Tick(u64),
}

/// Fan-out over plain mpsc channels. Receivers that have been dropped are
/// pruned on the next emit.
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Vec<mpsc::Sender<SessionEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub fn emit(&mut self, event: SessionEvent) {
        self.senders.retain(|tx| tx.send(event).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_events() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();

        bus.emit(SessionEvent::Tick(1));
        bus.emit(SessionEvent::CursorMoved(3));

        assert_eq!(rx.recv().unwrap(), SessionEvent::Tick(1));
        assert_eq!(rx.recv().unwrap(), SessionEvent::CursorMoved(3));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);

        bus.emit(SessionEvent::Tick(1));
        assert!(bus.senders.is_empty());
    }

    #[test]
    fn test_multiple_subscribers_each_get_a_copy() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.emit(SessionEvent::StatusChanged(InputStatus::Started));

        assert_eq!(
            a.recv().unwrap(),
            SessionEvent::StatusChanged(InputStatus::Started)
        );
        assert_eq!(
            b.recv().unwrap(),
            SessionEvent::StatusChanged(InputStatus::Started)
        );
    }
}

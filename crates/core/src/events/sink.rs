//! Where services send their domain events.

use std::sync::{Arc, Mutex, MutexGuard};

use super::DomainEvent;

/// Receives events emitted by core services after a write has committed.
///
/// Implementations must not block: the server adapter hands events to a
/// broadcast channel and returns. A dropped event never fails the write
/// that produced it.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Sink that records every event, used by service tests.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<DomainEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Recorded events, in emission order.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.guard().clone()
    }

    /// Realtime table of each recorded event, in emission order.
    pub fn tables(&self) -> Vec<&'static str> {
        self.guard().iter().map(DomainEvent::table).collect()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.guard().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_emission_order() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        let shared: Arc<dyn DomainEventSink> = Arc::new(sink.clone());
        shared.emit(DomainEvent::email_verified("u1".to_string()));
        shared.emit(DomainEvent::notification_created(
            "n1".to_string(),
            "u1".to_string(),
            "follow".to_string(),
            "Ada followed you".to_string(),
        ));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.tables(), vec!["profiles", "notifications"]);
        assert_eq!(sink.events()[0], DomainEvent::email_verified("u1".to_string()));
    }
}

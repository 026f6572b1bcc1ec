use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::broadcast;
use voltmarket_core::events::{DomainEvent, DomainEventSink, RealtimeFeed};

/// Canonical SSE event names.
pub const LISTING_PUBLISHED: &str = "listing:published";
pub const NOTIFICATION_CREATED: &str = "notification:created";
pub const WATCHLIST_CHANGED: &str = "watchlist:changed";
pub const PORTFOLIO_ITEM_CHANGED: &str = "portfolio:item-changed";
pub const EMAIL_VERIFIED: &str = "profile:email-verified";

/// Envelope carried on the bus: the SSE event name plus the domain event it
/// was built from, kept for per-subscriber filtering.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub source: DomainEvent,
}

impl ServerEvent {
    pub fn from_domain(event: DomainEvent) -> Self {
        let name = match &event {
            DomainEvent::ListingPublished { .. } => LISTING_PUBLISHED,
            DomainEvent::NotificationCreated { .. } => NOTIFICATION_CREATED,
            DomainEvent::WatchlistChanged { .. } => WATCHLIST_CHANGED,
            DomainEvent::PortfolioItemChanged { .. } => PORTFOLIO_ITEM_CHANGED,
            DomainEvent::EmailVerified { .. } => EMAIL_VERIFIED,
        };
        Self {
            name,
            source: event,
        }
    }

    pub fn table(&self) -> &'static str {
        self.source.table()
    }

    pub fn payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.source)
    }
}

/// Lightweight broadcast bus that fans out events to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No receivers is not an error; lagging receivers lose old events.
        let _ = self.sender.send(event);
    }
}

/// The most recent domain events, shared between the sink that appends them
/// and the handlers that read them back.
#[derive(Clone)]
pub struct RecentEvents {
    feed: Arc<Mutex<RealtimeFeed<DomainEvent>>>,
}

impl RecentEvents {
    pub fn new(capacity: usize) -> Self {
        Self {
            feed: Arc::new(Mutex::new(RealtimeFeed::new(capacity))),
        }
    }

    fn guard(&self) -> MutexGuard<'_, RealtimeFeed<DomainEvent>> {
        self.feed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, event: DomainEvent) {
        self.guard().push(event);
    }

    /// Retained events for `table` matching the optional filter, oldest first.
    pub fn matching(&self, table: &str, filter: Option<(&str, &str)>) -> Vec<ServerEvent> {
        self.guard()
            .matching(table, filter)
            .into_iter()
            .map(ServerEvent::from_domain)
            .collect()
    }
}

/// Domain event sink that appends every event to the recent feed and
/// forwards it onto the bus.
#[derive(Clone)]
pub struct BusDomainEventSink {
    bus: EventBus,
    recent: RecentEvents,
}

impl BusDomainEventSink {
    pub fn new(bus: EventBus, recent: RecentEvents) -> Self {
        Self { bus, recent }
    }
}

impl DomainEventSink for BusDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        tracing::debug!("Publishing {} event", event.table());
        self.recent.record(event.clone());
        self.bus.publish(ServerEvent::from_domain(event));
    }
}

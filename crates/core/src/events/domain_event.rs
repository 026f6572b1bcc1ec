//! Domain event types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::listings::ListingAssetType;

/// Tables that emit realtime events.
pub const REALTIME_TABLES: [&str; 5] = [
    "listings",
    "notifications",
    "watchlist",
    "portfolio_items",
    "profiles",
];

/// Domain events emitted by core services after successful inserts and
/// updates.
///
/// Each event is attributed to the table it describes so realtime
/// subscribers can filter by table and column equality.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A listing was inserted with status `active`.
    ListingPublished {
        listing_id: String,
        seller_id: String,
        asset_type: ListingAssetType,
        title: String,
    },

    /// A social notification was inserted for `user_id`.
    NotificationCreated {
        notification_id: String,
        user_id: String,
        kind: String,
        message: String,
    },

    /// A listing was added to or removed from a watchlist.
    WatchlistChanged {
        user_id: String,
        listing_id: String,
        added: bool,
    },

    /// A portfolio item was inserted or its valuation/status changed.
    PortfolioItemChanged {
        portfolio_id: String,
        item_id: String,
    },

    /// A profile's email address was verified.
    EmailVerified { user_id: String },
}

impl DomainEvent {
    /// Creates a ListingPublished event.
    pub fn listing_published(
        listing_id: String,
        seller_id: String,
        asset_type: ListingAssetType,
        title: String,
    ) -> Self {
        Self::ListingPublished {
            listing_id,
            seller_id,
            asset_type,
            title,
        }
    }

    /// Creates a NotificationCreated event.
    pub fn notification_created(
        notification_id: String,
        user_id: String,
        kind: String,
        message: String,
    ) -> Self {
        Self::NotificationCreated {
            notification_id,
            user_id,
            kind,
            message,
        }
    }

    /// Creates a WatchlistChanged event.
    pub fn watchlist_changed(user_id: String, listing_id: String, added: bool) -> Self {
        Self::WatchlistChanged {
            user_id,
            listing_id,
            added,
        }
    }

    /// Creates a PortfolioItemChanged event.
    pub fn portfolio_item_changed(portfolio_id: String, item_id: String) -> Self {
        Self::PortfolioItemChanged {
            portfolio_id,
            item_id,
        }
    }

    /// Creates an EmailVerified event.
    pub fn email_verified(user_id: String) -> Self {
        Self::EmailVerified { user_id }
    }

    /// Name of the table the event describes.
    pub fn table(&self) -> &'static str {
        match self {
            DomainEvent::ListingPublished { .. } => "listings",
            DomainEvent::NotificationCreated { .. } => "notifications",
            DomainEvent::WatchlistChanged { .. } => "watchlist",
            DomainEvent::PortfolioItemChanged { .. } => "portfolio_items",
            DomainEvent::EmailVerified { .. } => "profiles",
        }
    }

    /// Returns the event's field `column` rendered as a string, if present.
    pub fn column_value(&self, column: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        match value.get(column)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Realtime filter check: same table and, when given, `column == value`.
    pub fn matches(&self, table: &str, filter: Option<(&str, &str)>) -> bool {
        if self.table() != table {
            return false;
        }
        match filter {
            Some((column, expected)) => self.column_value(column).as_deref() == Some(expected),
            None => true,
        }
    }
}

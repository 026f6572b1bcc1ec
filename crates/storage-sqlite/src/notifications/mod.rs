//! SQLite storage implementation for social notifications.

mod model;
mod repository;

pub use model::NotificationDB;
pub use repository::NotificationRepository;

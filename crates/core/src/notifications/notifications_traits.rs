use async_trait::async_trait;

use super::notifications_model::{NewNotification, Notification};
use crate::errors::Result;

#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    async fn create(&self, notification: NewNotification) -> Result<Notification>;

    /// Newest first, at most `limit` rows.
    fn list_for_user(&self, user_id: &str, unread_only: bool, limit: i64)
        -> Result<Vec<Notification>>;

    async fn mark_read(&self, notification_id: &str) -> Result<Notification>;

    /// Returns the number of notifications flipped to read.
    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    async fn notify(&self, notification: NewNotification) -> Result<Notification>;

    fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>>;

    async fn mark_read(&self, notification_id: &str) -> Result<Notification>;

    async fn mark_all_read(&self, user_id: &str) -> Result<usize>;
}

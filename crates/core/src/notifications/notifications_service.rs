use std::sync::Arc;

use async_trait::async_trait;

use super::notifications_model::{NewNotification, Notification};
use super::notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
use crate::constants::effective_limit;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};

pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl NotificationService {
    pub fn new(
        repository: Arc<dyn NotificationRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify(&self, notification: NewNotification) -> Result<Notification> {
        notification.validate()?;
        let created = self.repository.create(notification).await?;
        self.event_sink.emit(DomainEvent::notification_created(
            created.id.clone(),
            created.user_id.clone(),
            created.kind.to_string(),
            created.message.clone(),
        ));
        Ok(created)
    }

    fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>> {
        self.repository
            .list_for_user(user_id, unread_only, effective_limit(limit))
    }

    async fn mark_read(&self, notification_id: &str) -> Result<Notification> {
        self.repository.mark_read(notification_id).await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        self.repository.mark_all_read(user_id).await
    }
}

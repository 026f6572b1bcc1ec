use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;
use voltmarket_core::notifications::{NewNotification, Notification, NotificationRepositoryTrait};
use voltmarket_core::Result;

use super::model::NotificationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, OrNotFound};
use crate::schema::notifications;

pub struct NotificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn create(&self, notification: NewNotification) -> Result<Notification> {
        let row = NotificationDB {
            id: Uuid::new_v4().to_string(),
            user_id: notification.user_id.trim().to_string(),
            actor_id: notification.actor_id,
            kind: notification.kind.as_str().to_string(),
            message: notification.message,
            is_read: false,
            created_at: Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                let inserted = diesel::insert_into(notifications::table)
                    .values(&row)
                    .returning(NotificationDB::as_returning())
                    .get_result::<NotificationDB>(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
    ) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = notifications::table
            .select(NotificationDB::as_select())
            .filter(notifications::user_id.eq(user_id.to_string()))
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::is_read.eq(false));
        }
        let rows: Vec<NotificationDB> = query
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .limit(limit)
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(&self, notification_id: &str) -> Result<Notification> {
        let notification_id = notification_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Notification> {
                diesel::update(notifications::table.find(&notification_id))
                    .set(notifications::is_read.eq(true))
                    .returning(NotificationDB::as_returning())
                    .get_result::<NotificationDB>(conn)
                    .or_not_found(|| format!("Notification {}", notification_id))
                    .map(Notification::from)
            })
            .await
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::update(
                    notifications::table
                        .filter(notifications::user_id.eq(&user_id))
                        .filter(notifications::is_read.eq(false)),
                )
                .set(notifications::is_read.eq(true))
                .execute(conn)
                .into_core()
            })
            .await
    }
}

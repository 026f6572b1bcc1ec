use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use voltmarket_core::notifications::{Notification, NotificationKind};

use crate::utils::parse_enum_or;

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub actor_id: Option<String>,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Self {
            kind: parse_enum_or(&db.kind, "notification kind", NotificationKind::Message),
            id: db.id,
            user_id: db.user_id,
            actor_id: db.actor_id,
            message: db.message,
            read: db.is_read,
            created_at: db.created_at,
        }
    }
}

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use voltmarket_core::watchlist::WatchlistEntry;

use crate::listings::ListingDB;

#[derive(
    Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(belongs_to(ListingDB, foreign_key = listing_id))]
#[diesel(table_name = crate::schema::watchlist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WatchlistDB {
    pub id: String,
    pub user_id: String,
    pub listing_id: String,
    pub created_at: NaiveDateTime,
}

impl From<WatchlistDB> for WatchlistEntry {
    fn from(db: WatchlistDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            listing_id: db.listing_id,
            created_at: db.created_at,
        }
    }
}

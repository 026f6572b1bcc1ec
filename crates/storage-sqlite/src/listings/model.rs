//! Database model for listings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use voltmarket_core::listings::{Listing, ListingAssetType, ListingStatus};

use crate::utils::{parse_enum_or, parse_optional_decimal};

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ListingDB {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub asset_type: String,
    pub capacity_mw: Option<String>,
    pub asking_price: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ListingDB> for Listing {
    fn from(db: ListingDB) -> Self {
        Self {
            asset_type: parse_enum_or(&db.asset_type, "asset type", ListingAssetType::Other),
            status: parse_enum_or(&db.status, "listing status", ListingStatus::Draft),
            capacity_mw: parse_optional_decimal(db.capacity_mw.as_deref(), "capacity_mw"),
            asking_price: parse_optional_decimal(db.asking_price.as_deref(), "asking_price"),
            id: db.id,
            seller_id: db.seller_id,
            title: db.title,
            location: db.location,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

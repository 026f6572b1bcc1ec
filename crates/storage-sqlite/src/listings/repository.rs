use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;
use voltmarket_core::constants::effective_limit;
use voltmarket_core::listings::{
    Listing, ListingFilter, ListingRepositoryTrait, ListingStatus, NewListing,
};
use voltmarket_core::Result;

use super::model::ListingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, OrNotFound};
use crate::schema::listings;

pub struct ListingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ListingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ListingRepositoryTrait for ListingRepository {
    async fn create(&self, new_listing: NewListing) -> Result<Listing> {
        let now = Utc::now().naive_utc();
        let row = ListingDB {
            id: Uuid::new_v4().to_string(),
            seller_id: new_listing.seller_id.trim().to_string(),
            title: new_listing.title.trim().to_string(),
            asset_type: new_listing.asset_type.as_str().to_string(),
            capacity_mw: new_listing.capacity_mw.map(|c| c.to_string()),
            asking_price: new_listing.asking_price.map(|p| p.to_string()),
            location: new_listing.location,
            status: new_listing.status.as_str().to_string(),
            description: new_listing.description,
            created_at: now,
            updated_at: now,
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Listing> {
                let inserted = diesel::insert_into(listings::table)
                    .values(&row)
                    .returning(ListingDB::as_returning())
                    .get_result::<ListingDB>(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    fn get_by_id(&self, listing_id: &str) -> Result<Listing> {
        let mut conn = get_connection(&self.pool)?;
        listings::table
            .find(listing_id)
            .select(ListingDB::as_select())
            .first::<ListingDB>(&mut conn)
            .or_not_found(|| format!("Listing {}", listing_id))
            .map(Listing::from)
    }

    fn list(&self, filter: &ListingFilter) -> Result<Vec<Listing>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = listings::table
            .select(ListingDB::as_select())
            .into_boxed();
        if let Some(asset_type) = filter.asset_type {
            query = query.filter(listings::asset_type.eq(asset_type.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(listings::status.eq(status.as_str()));
        }
        if let Some(seller_id) = &filter.seller_id {
            query = query.filter(listings::seller_id.eq(seller_id.clone()));
        }

        let rows: Vec<ListingDB> = query
            .order((listings::created_at.desc(), listings::id.asc()))
            .limit(effective_limit(filter.limit))
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn update_status(&self, listing_id: &str, status: ListingStatus) -> Result<Listing> {
        let listing_id = listing_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Listing> {
                diesel::update(listings::table.find(&listing_id))
                    .set((
                        listings::status.eq(status.as_str()),
                        listings::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ListingDB::as_returning())
                    .get_result::<ListingDB>(conn)
                    .or_not_found(|| format!("Listing {}", listing_id))
                    .map(Listing::from)
            })
            .await
    }
}

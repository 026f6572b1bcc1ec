use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;
use voltmarket_core::listings::Listing;
use voltmarket_core::watchlist::{
    NewWatchlistEntry, WatchlistEntry, WatchlistItem, WatchlistRepositoryTrait,
};
use voltmarket_core::Result;

use super::model::WatchlistDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::listings::ListingDB;
use crate::schema::{listings, watchlist};
use crate::utils::chunk_for_sqlite;

pub struct WatchlistRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    async fn add(&self, entry: NewWatchlistEntry) -> Result<(WatchlistEntry, bool)> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<(WatchlistEntry, bool)> {
                let existing = watchlist::table
                    .filter(watchlist::user_id.eq(&entry.user_id))
                    .filter(watchlist::listing_id.eq(&entry.listing_id))
                    .select(WatchlistDB::as_select())
                    .first::<WatchlistDB>(conn)
                    .optional()
                    .into_core()?;
                if let Some(row) = existing {
                    return Ok((row.into(), false));
                }

                let row = WatchlistDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: entry.user_id,
                    listing_id: entry.listing_id,
                    created_at: Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(watchlist::table)
                    .values(&row)
                    .returning(WatchlistDB::as_returning())
                    .get_result::<WatchlistDB>(conn)
                    .into_core()?;
                Ok((inserted.into(), true))
            })
            .await
    }

    async fn remove(&self, user_id: &str, listing_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let listing_id = listing_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    watchlist::table
                        .filter(watchlist::user_id.eq(&user_id))
                        .filter(watchlist::listing_id.eq(&listing_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<WatchlistItem>> {
        let mut conn = get_connection(&self.pool)?;
        let entries: Vec<WatchlistDB> = watchlist::table
            .filter(watchlist::user_id.eq(user_id))
            .order((watchlist::created_at.desc(), watchlist::id.asc()))
            .select(WatchlistDB::as_select())
            .load(&mut conn)
            .into_core()?;

        let listing_ids: Vec<String> = entries.iter().map(|e| e.listing_id.clone()).collect();
        let mut listings_by_id: HashMap<String, Listing> = HashMap::new();
        for chunk in chunk_for_sqlite(&listing_ids) {
            let rows: Vec<ListingDB> = listings::table
                .filter(listings::id.eq_any(chunk))
                .select(ListingDB::as_select())
                .load(&mut conn)
                .into_core()?;
            listings_by_id.extend(rows.into_iter().map(|row| (row.id.clone(), row.into())));
        }

        Ok(entries
            .into_iter()
            .map(|row| {
                let listing = listings_by_id.get(&row.listing_id).cloned();
                WatchlistItem {
                    entry: row.into(),
                    listing,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::listings::ListingRepository;
    use tempfile::tempdir;
    use voltmarket_core::errors::{DatabaseError, Error};
    use voltmarket_core::listings::{
        ListingAssetType, ListingRepositoryTrait, ListingStatus, NewListing,
    };

    async fn setup() -> (WatchlistRepository, ListingRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();
        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (
            WatchlistRepository::new(pool.clone(), writer.clone()),
            ListingRepository::new(pool, writer),
            temp_dir,
        )
    }

    async fn listing(repo: &ListingRepository) -> Listing {
        repo.create(NewListing {
            seller_id: "seller".to_string(),
            title: "Transformer bank".to_string(),
            asset_type: ListingAssetType::Equipment,
            capacity_mw: None,
            asking_price: None,
            location: None,
            status: ListingStatus::Active,
            description: None,
        })
        .await
        .unwrap()
    }

    fn entry(listing_id: &str) -> NewWatchlistEntry {
        NewWatchlistEntry {
            user_id: "buyer".to_string(),
            listing_id: listing_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_is_idempotent_and_joins_listing() {
        let (repo, listings, _dir) = setup().await;
        let listing = listing(&listings).await;

        let (first, inserted) = repo.add(entry(&listing.id)).await.unwrap();
        assert!(inserted);
        let (second, inserted_again) = repo.add(entry(&listing.id)).await.unwrap();
        assert!(!inserted_again);
        assert_eq!(first.id, second.id);

        let items = repo.list_for_user("buyer").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].listing.as_ref().map(|l| l.id.as_str()), Some(listing.id.as_str()));
    }

    #[tokio::test]
    async fn test_remove_reports_affected_rows() {
        let (repo, listings, _dir) = setup().await;
        let listing = listing(&listings).await;
        repo.add(entry(&listing.id)).await.unwrap();

        assert_eq!(repo.remove("buyer", &listing.id).await.unwrap(), 1);
        assert_eq!(repo.remove("buyer", &listing.id).await.unwrap(), 0);
        assert!(repo.list_for_user("buyer").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_listing_violates_foreign_key() {
        let (repo, _listings, _dir) = setup().await;
        let err = repo.add(entry("ghost")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }
}

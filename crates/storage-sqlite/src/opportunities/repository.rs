use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use voltmarket_core::opportunities::{DistressedCompany, IdleSite, OpportunitySourceTrait};
use voltmarket_core::Result;

use super::model::{DistressedCompanyDB, IdleSiteDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{distressed_companies, idle_sites};

/// Reads the ingested idle sites and distressed companies.
pub struct OpportunitySourceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OpportunitySourceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Inserts or replaces an idle site row.
    pub async fn upsert_idle_site(&self, site: IdleSite) -> Result<()> {
        let row = IdleSiteDB::from(site);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(idle_sites::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    /// Inserts or replaces a distressed company row.
    pub async fn upsert_distressed_company(&self, company: DistressedCompany) -> Result<()> {
        let row = DistressedCompanyDB::from(company);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(distressed_companies::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl OpportunitySourceTrait for OpportunitySourceRepository {
    async fn fetch_idle_sites(&self) -> Result<Vec<IdleSite>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<IdleSiteDB> = idle_sites::table
            .order(idle_sites::discovered_at.desc())
            .select(IdleSiteDB::as_select())
            .load::<IdleSiteDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(IdleSite::from).collect())
    }

    async fn fetch_distressed_companies(&self) -> Result<Vec<DistressedCompany>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<DistressedCompanyDB> = distressed_companies::table
            .order(distressed_companies::discovered_at.desc())
            .select(DistressedCompanyDB::as_select())
            .load::<DistressedCompanyDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(DistressedCompany::from).collect())
    }
}

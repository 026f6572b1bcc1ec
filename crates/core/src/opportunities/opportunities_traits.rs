use async_trait::async_trait;

use super::opportunities_model::{DistressedCompany, IdleSite, Opportunity, OpportunityQuery};
use crate::errors::Result;

/// Read access to the raw scanner sources.
#[async_trait]
pub trait OpportunitySourceTrait: Send + Sync {
    async fn fetch_idle_sites(&self) -> Result<Vec<IdleSite>>;

    async fn fetch_distressed_companies(&self) -> Result<Vec<DistressedCompany>>;
}

#[async_trait]
pub trait OpportunityScannerTrait: Send + Sync {
    /// Scans every source. Never fails: an unavailable source contributes
    /// no opportunities.
    async fn scan(&self, query: &OpportunityQuery) -> Vec<Opportunity>;
}

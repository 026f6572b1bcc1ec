use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::opportunities_mapper::{map_distressed_company, map_idle_site};
use super::opportunities_model::{Opportunity, OpportunityQuery, DEFAULT_OPPORTUNITY_LIMIT};
use super::opportunities_traits::{OpportunityScannerTrait, OpportunitySourceTrait};
use crate::constants::MAX_LIST_LIMIT;

pub struct OpportunityScanner {
    source: Arc<dyn OpportunitySourceTrait>,
}

impl OpportunityScanner {
    pub fn new(source: Arc<dyn OpportunitySourceTrait>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl OpportunityScannerTrait for OpportunityScanner {
    async fn scan(&self, query: &OpportunityQuery) -> Vec<Opportunity> {
        let idle = match self.source.fetch_idle_sites().await {
            Ok(sites) => sites.iter().map(map_idle_site).collect(),
            Err(e) => {
                warn!("Idle site scan failed, continuing without it: {}", e);
                Vec::new()
            }
        };
        let distressed = match self.source.fetch_distressed_companies().await {
            Ok(companies) => companies.iter().map(map_distressed_company).collect(),
            Err(e) => {
                warn!("Distressed company scan failed, continuing without it: {}", e);
                Vec::new()
            }
        };

        let mut results: Vec<Opportunity> = idle
            .into_iter()
            .chain(distressed)
            .filter(|o| {
                query
                    .opportunity_type
                    .map_or(true, |t| o.opportunity_type == t)
            })
            .filter(|o| query.min_score.map_or(true, |min| o.distress_score >= min))
            .collect();

        results.sort_by(|a, b| {
            b.distress_score
                .cmp(&a.distress_score)
                .then_with(|| a.id.cmp(&b.id))
        });

        let limit = query
            .limit
            .unwrap_or(DEFAULT_OPPORTUNITY_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        results.truncate(limit as usize);
        debug!("Opportunity scan returned {} results", results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DatabaseError, Error, Result};
    use crate::opportunities::{DistressedCompany, IdleSite, OpportunityType};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::Map;

    struct StaticSource {
        sites: Option<Vec<IdleSite>>,
        companies: Option<Vec<DistressedCompany>>,
    }

    #[async_trait]
    impl OpportunitySourceTrait for StaticSource {
        async fn fetch_idle_sites(&self) -> Result<Vec<IdleSite>> {
            self.sites.clone().ok_or_else(|| {
                Error::Database(DatabaseError::QueryFailed("idle_sites offline".to_string()))
            })
        }

        async fn fetch_distressed_companies(&self) -> Result<Vec<DistressedCompany>> {
            self.companies.clone().ok_or_else(|| {
                Error::Database(DatabaseError::QueryFailed(
                    "distressed_companies offline".to_string(),
                ))
            })
        }
    }

    fn site(id: &str, score: Decimal) -> IdleSite {
        IdleSite {
            id: id.to_string(),
            site_name: format!("Site {}", id),
            city: None,
            state: None,
            property_type: None,
            square_footage: None,
            idle_score: Some(score),
            satellite_metadata: Map::new(),
            discovered_at: Utc::now().naive_utc(),
        }
    }

    fn company(id: &str, health: Decimal) -> DistressedCompany {
        DistressedCompany {
            id: id.to_string(),
            company_name: format!("Company {}", id),
            city: None,
            state: None,
            industry: None,
            employee_count: None,
            financial_health_score: Some(health),
            financial_data: Map::new(),
            discovered_at: Utc::now().naive_utc(),
        }
    }

    fn scanner(
        sites: Option<Vec<IdleSite>>,
        companies: Option<Vec<DistressedCompany>>,
    ) -> OpportunityScanner {
        OpportunityScanner::new(Arc::new(StaticSource { sites, companies }))
    }

    #[tokio::test]
    async fn test_scan_merges_and_sorts_by_score() {
        let scanner = scanner(
            Some(vec![site("s1", dec!(40)), site("s2", dec!(90))]),
            Some(vec![company("c1", dec!(20))]),
        );
        let results = scanner.scan(&OpportunityQuery::default()).await;
        let ids: Vec<&str> = results.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "c1", "s1"]);
    }

    #[tokio::test]
    async fn test_failing_source_degrades_to_empty() {
        let partial = scanner(None, Some(vec![company("c1", dec!(10))]));
        let results = partial.scan(&OpportunityQuery::default()).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].opportunity_type, OpportunityType::Distressed);

        let nothing = scanner(None, None).scan(&OpportunityQuery::default()).await;
        assert!(nothing.is_empty());
    }

    #[tokio::test]
    async fn test_filters_and_limit() {
        let scanner = scanner(
            Some(vec![site("s1", dec!(40)), site("s2", dec!(90)), site("s3", dec!(65))]),
            Some(vec![company("c1", dec!(5))]),
        );

        let idle_only = scanner
            .scan(&OpportunityQuery {
                opportunity_type: Some(OpportunityType::Idle),
                min_score: Some(dec!(50)),
                limit: None,
            })
            .await;
        let ids: Vec<&str> = idle_only.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s3"]);

        let top = scanner
            .scan(&OpportunityQuery {
                limit: Some(1),
                ..Default::default()
            })
            .await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, "c1");
    }
}

//! Opportunity domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Number of opportunities returned when no limit is requested.
pub const DEFAULT_OPPORTUNITY_LIMIT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityType {
    Idle,
    Distressed,
}

impl OpportunityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityType::Idle => "idle",
            OpportunityType::Distressed => "distressed",
        }
    }
}

impl fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpportunityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(OpportunityType::Idle),
            "distressed" => Ok(OpportunityType::Distressed),
            other => Err(Error::invalid_input(format!(
                "Unknown opportunity type '{}'",
                other
            ))),
        }
    }
}

/// Raw idle industrial site row as stored by the site ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdleSite {
    pub id: String,
    pub site_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub property_type: Option<String>,
    pub square_footage: Option<i64>,
    /// Externally supplied idleness score, 0-100.
    pub idle_score: Option<Decimal>,
    #[serde(default)]
    pub satellite_metadata: Map<String, Value>,
    pub discovered_at: NaiveDateTime,
}

/// Raw distressed company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistressedCompany {
    pub id: String,
    pub company_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<i64>,
    /// 0-100, higher is healthier.
    pub financial_health_score: Option<Decimal>,
    #[serde(default)]
    pub financial_data: Map<String, Value>,
    pub discovered_at: NaiveDateTime,
}

/// Unified scanner result. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    /// Id of the source row.
    pub id: String,
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
    pub name: String,
    pub location: String,
    pub distress_score: Decimal,
    pub insight: String,
    pub opportunity_details: Map<String, Value>,
    pub discovered_at: NaiveDateTime,
}

/// Scanner filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityQuery {
    pub min_score: Option<Decimal>,
    #[serde(rename = "type")]
    pub opportunity_type: Option<OpportunityType>,
    pub limit: Option<i64>,
}

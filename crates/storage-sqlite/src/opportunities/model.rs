use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use voltmarket_core::opportunities::{DistressedCompany, IdleSite};

use crate::utils::{parse_json_object, parse_optional_decimal};

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::idle_sites)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct IdleSiteDB {
    pub id: String,
    pub site_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub property_type: Option<String>,
    pub square_footage: Option<i64>,
    pub idle_score: Option<String>,
    pub satellite_metadata: String,
    pub discovered_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::distressed_companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DistressedCompanyDB {
    pub id: String,
    pub company_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<i64>,
    pub financial_health_score: Option<String>,
    pub financial_data: String,
    pub discovered_at: NaiveDateTime,
}

impl From<IdleSiteDB> for IdleSite {
    fn from(db: IdleSiteDB) -> Self {
        Self {
            satellite_metadata: parse_json_object(&db.satellite_metadata, "satellite_metadata"),
            idle_score: parse_optional_decimal(db.idle_score.as_deref(), "idle_score"),
            id: db.id,
            site_name: db.site_name,
            city: db.city,
            state: db.state,
            property_type: db.property_type,
            square_footage: db.square_footage,
            discovered_at: db.discovered_at,
        }
    }
}

impl From<IdleSite> for IdleSiteDB {
    fn from(site: IdleSite) -> Self {
        Self {
            satellite_metadata: serde_json::Value::Object(site.satellite_metadata).to_string(),
            idle_score: site.idle_score.map(|s| s.to_string()),
            id: site.id,
            site_name: site.site_name,
            city: site.city,
            state: site.state,
            property_type: site.property_type,
            square_footage: site.square_footage,
            discovered_at: site.discovered_at,
        }
    }
}

impl From<DistressedCompanyDB> for DistressedCompany {
    fn from(db: DistressedCompanyDB) -> Self {
        Self {
            financial_data: parse_json_object(&db.financial_data, "financial_data"),
            financial_health_score: parse_optional_decimal(
                db.financial_health_score.as_deref(),
                "financial_health_score",
            ),
            id: db.id,
            company_name: db.company_name,
            city: db.city,
            state: db.state,
            industry: db.industry,
            employee_count: db.employee_count,
            discovered_at: db.discovered_at,
        }
    }
}

impl From<DistressedCompany> for DistressedCompanyDB {
    fn from(company: DistressedCompany) -> Self {
        Self {
            financial_data: serde_json::Value::Object(company.financial_data).to_string(),
            financial_health_score: company.financial_health_score.map(|s| s.to_string()),
            id: company.id,
            company_name: company.company_name,
            city: company.city,
            state: company.state,
            industry: company.industry,
            employee_count: company.employee_count,
            discovered_at: company.discovered_at,
        }
    }
}

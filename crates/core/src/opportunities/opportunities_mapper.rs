use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};

use super::opportunities_model::{DistressedCompany, IdleSite, Opportunity, OpportunityType};

pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Health assumed for companies with no score on file.
const NEUTRAL_HEALTH_SCORE: Decimal = dec!(50);

/// Joins the non-blank parts of `city` and `state` with ", ".
pub fn format_location(city: Option<&str>, state: Option<&str>) -> String {
    let parts: Vec<&str> = [city, state]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}

/// `100 - health`, with a missing health score treated as neutral. The
/// result is clamped to 0..=100.
pub fn company_distress_score(financial_health_score: Option<Decimal>) -> Decimal {
    let health = financial_health_score
        .unwrap_or(NEUTRAL_HEALTH_SCORE)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    Decimal::ONE_HUNDRED - health
}

fn insert_opt<T: Into<Value>>(details: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        details.insert(key.to_string(), v.into());
    }
}

pub fn map_idle_site(site: &IdleSite) -> Opportunity {
    let score = site.idle_score.unwrap_or(Decimal::ZERO);
    let location = format_location(site.city.as_deref(), site.state.as_deref());

    let mut details = site.satellite_metadata.clone();
    insert_opt(&mut details, "propertyType", site.property_type.clone());
    insert_opt(&mut details, "squareFootage", site.square_footage);

    let insight = match &site.property_type {
        Some(kind) if !kind.trim().is_empty() => format!(
            "{} in {} shows an idle score of {}; the {} may be available for repurposing",
            site.site_name,
            location,
            score.normalize(),
            kind.trim().to_lowercase()
        ),
        _ => format!(
            "{} in {} shows an idle score of {}; the site may be available for repurposing",
            site.site_name,
            location,
            score.normalize()
        ),
    };

    Opportunity {
        id: site.id.clone(),
        opportunity_type: OpportunityType::Idle,
        name: site.site_name.clone(),
        location,
        distress_score: score,
        insight,
        opportunity_details: details,
        discovered_at: site.discovered_at,
    }
}

pub fn map_distressed_company(company: &DistressedCompany) -> Opportunity {
    let score = company_distress_score(company.financial_health_score);
    let location = format_location(company.city.as_deref(), company.state.as_deref());

    let mut details = company.financial_data.clone();
    insert_opt(&mut details, "industry", company.industry.clone());
    insert_opt(&mut details, "employeeCount", company.employee_count);
    if let Some(health) = company.financial_health_score {
        details.insert(
            "financialHealthScore".to_string(),
            Value::String(health.normalize().to_string()),
        );
    }

    let industry = company
        .industry
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("company");
    let insight = format!(
        "{} ({}) in {} has a distress score of {}; its assets may come to market",
        company.company_name,
        industry,
        location,
        score.normalize()
    );

    Opportunity {
        id: company.id.clone(),
        opportunity_type: OpportunityType::Distressed,
        name: company.company_name.clone(),
        location,
        distress_score: score,
        insight,
        opportunity_details: details,
        discovered_at: company.discovered_at,
    }
}

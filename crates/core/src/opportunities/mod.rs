//! Opportunities module - normalizes idle sites and distressed companies
//! into a single scannable shape.

mod opportunities_mapper;
mod opportunities_model;
mod opportunities_service;
mod opportunities_traits;

pub use opportunities_mapper::{
    company_distress_score, format_location, map_distressed_company, map_idle_site,
    UNKNOWN_LOCATION,
};
pub use opportunities_model::{
    DistressedCompany, IdleSite, Opportunity, OpportunityQuery, OpportunityType,
    DEFAULT_OPPORTUNITY_LIMIT,
};
pub use opportunities_service::OpportunityScanner;
pub use opportunities_traits::{OpportunityScannerTrait, OpportunitySourceTrait};

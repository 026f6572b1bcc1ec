//! Listing domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingAssetType {
    Solar,
    Wind,
    Storage,
    Substation,
    Equipment,
    Other,
}

impl ListingAssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingAssetType::Solar => "solar",
            ListingAssetType::Wind => "wind",
            ListingAssetType::Storage => "storage",
            ListingAssetType::Substation => "substation",
            ListingAssetType::Equipment => "equipment",
            ListingAssetType::Other => "other",
        }
    }
}

impl fmt::Display for ListingAssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingAssetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solar" => Ok(ListingAssetType::Solar),
            "wind" => Ok(ListingAssetType::Wind),
            "storage" => Ok(ListingAssetType::Storage),
            "substation" => Ok(ListingAssetType::Substation),
            "equipment" => Ok(ListingAssetType::Equipment),
            "other" => Ok(ListingAssetType::Other),
            other => Err(Error::invalid_input(format!(
                "Unknown listing asset type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Draft,
    Active,
    UnderOffer,
    Sold,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Active => "active",
            ListingStatus::UnderOffer => "under_offer",
            ListingStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(ListingStatus::Draft),
            "active" => Ok(ListingStatus::Active),
            "under_offer" => Ok(ListingStatus::UnderOffer),
            "sold" => Ok(ListingStatus::Sold),
            other => Err(Error::invalid_input(format!(
                "Unknown listing status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub asset_type: ListingAssetType,
    pub capacity_mw: Option<Decimal>,
    pub asking_price: Option<Decimal>,
    pub location: Option<String>,
    pub status: ListingStatus,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub seller_id: String,
    pub title: String,
    pub asset_type: ListingAssetType,
    pub capacity_mw: Option<Decimal>,
    pub asking_price: Option<Decimal>,
    pub location: Option<String>,
    #[serde(default)]
    pub status: ListingStatus,
    pub description: Option<String>,
}

impl NewListing {
    pub fn validate(&self) -> Result<()> {
        if self.seller_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "sellerId".to_string(),
            )));
        }
        if self.title.trim().is_empty() {
            return Err(Error::invalid_input("Listing title cannot be empty"));
        }
        if self.asking_price.is_some_and(|p| p.is_sign_negative()) {
            return Err(Error::invalid_input("Asking price cannot be negative"));
        }
        if self.capacity_mw.is_some_and(|c| c.is_sign_negative()) {
            return Err(Error::invalid_input("Capacity cannot be negative"));
        }
        Ok(())
    }
}

/// Equality filters for listing queries. Results are newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    pub asset_type: Option<ListingAssetType>,
    pub status: Option<ListingStatus>,
    pub seller_id: Option<String>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn listing() -> NewListing {
        NewListing {
            seller_id: "seller-1".to_string(),
            title: "20MW solar farm".to_string(),
            asset_type: ListingAssetType::Solar,
            capacity_mw: Some(dec!(20)),
            asking_price: Some(dec!(14000000)),
            location: Some("Fresno, CA".to_string()),
            status: ListingStatus::Active,
            description: None,
        }
    }

    #[test]
    fn test_validation() {
        assert!(listing().validate().is_ok());

        let mut untitled = listing();
        untitled.title = "  ".to_string();
        assert!(untitled.validate().is_err());

        let mut negative = listing();
        negative.asking_price = Some(dec!(-1));
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ListingStatus::UnderOffer).unwrap(),
            "under_offer"
        );
        assert_eq!(
            "under_offer".parse::<ListingStatus>().unwrap(),
            ListingStatus::UnderOffer
        );
        assert_eq!("Wind".parse::<ListingAssetType>().unwrap(), ListingAssetType::Wind);
    }
}

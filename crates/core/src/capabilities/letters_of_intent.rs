use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::capabilities_model::Capability;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterOfIntent {
    pub id: String,
    pub listing_id: String,
    pub buyer_id: String,
    pub offered_price: Decimal,
    pub terms: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLetterOfIntent {
    pub listing_id: String,
    pub buyer_id: String,
    pub offered_price: Decimal,
    pub terms: Option<String>,
}

#[async_trait]
pub trait LetterOfIntentServiceTrait: Send + Sync {
    async fn submit(&self, loi: NewLetterOfIntent) -> Result<LetterOfIntent>;

    fn list_for_user(&self, user_id: &str) -> Result<Vec<LetterOfIntent>>;
}

/// Adapter used until letters of intent have a backend.
#[derive(Clone, Default)]
pub struct UnavailableLetterOfIntentService;

#[async_trait]
impl LetterOfIntentServiceTrait for UnavailableLetterOfIntentService {
    async fn submit(&self, _loi: NewLetterOfIntent) -> Result<LetterOfIntent> {
        Err(Capability::LettersOfIntent.unavailable())
    }

    fn list_for_user(&self, _user_id: &str) -> Result<Vec<LetterOfIntent>> {
        Err(Capability::LettersOfIntent.unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_unavailable_adapter_reports_disabled() {
        let service = UnavailableLetterOfIntentService;
        let err = service
            .submit(NewLetterOfIntent {
                listing_id: "l1".to_string(),
                buyer_id: "b1".to_string(),
                offered_price: dec!(1000),
                terms: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FeatureUnavailable(_)));
        assert!(service.list_for_user("b1").is_err());
    }
}

//! Wire shapes of the serverless-function endpoints, documented in the
//! OpenAPI schema.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use voltmarket_core::capabilities::CapabilityStatus;
use voltmarket_core::map_config::MapConfig;
use voltmarket_core::verification::{
    IssueCodeRequest, IssuedCode, VerifyEmailRequest, VerifyEmailResponse,
};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MapboxConfig {
    pub mapbox_token: String,
}

impl From<MapConfig> for MapboxConfig {
    fn from(c: MapConfig) -> Self {
        Self {
            mapbox_token: c.mapbox_token,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct VerifyEmailBody {
    pub code: Option<String>,
    pub email: Option<String>,
}

impl From<VerifyEmailBody> for VerifyEmailRequest {
    fn from(b: VerifyEmailBody) -> Self {
        Self {
            code: b.code,
            email: b.email,
        }
    }
}

/// `user_id` stays snake_case for existing clients.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct VerifyEmailResult {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

impl From<VerifyEmailResponse> for VerifyEmailResult {
    fn from(r: VerifyEmailResponse) -> Self {
        Self {
            success: r.success,
            message: r.message,
            user_id: r.user_id,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeBody {
    pub email: Option<String>,
    pub user_id: Option<String>,
}

impl From<SendCodeBody> for IssueCodeRequest {
    fn from(b: SendCodeBody) -> Self {
        Self {
            email: b.email,
            user_id: b.user_id,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendCodeResult {
    pub success: bool,
    pub email: String,
    pub expires_at: chrono::NaiveDateTime,
}

impl From<IssuedCode> for SendCodeResult {
    fn from(i: IssuedCode) -> Self {
        Self {
            success: i.success,
            email: i.email,
            expires_at: i.expires_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityEntry {
    pub capability: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<CapabilityStatus> for CapabilityEntry {
    fn from(s: CapabilityStatus) -> Self {
        Self {
            capability: s.capability.as_str().to_string(),
            enabled: s.enabled,
            message: s.message,
        }
    }
}

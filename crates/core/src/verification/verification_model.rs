use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Digits in an issued code.
pub const CODE_LENGTH: usize = 6;

/// Lifetime of an issued code.
pub const CODE_TTL_MINUTES: i64 = 15;

pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired verification code";

/// Canonical form used for code lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCode {
    pub id: String,
    pub user_id: String,
    /// Stored lower-cased.
    pub email: String,
    pub code: String,
    pub expires_at: NaiveDateTime,
    pub used: bool,
    pub created_at: NaiveDateTime,
}

impl VerificationCode {
    pub fn is_redeemable(&self, now: NaiveDateTime) -> bool {
        !self.used && self.expires_at > now
    }
}

#[derive(Debug, Clone)]
pub struct NewVerificationCode {
    pub user_id: String,
    pub email: String,
    pub code: String,
    pub expires_at: NaiveDateTime,
}

/// Body of `verify-email-code`. Fields are optional so that missing values
/// surface as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl VerifyEmailRequest {
    /// Returns the trimmed code and the normalized email.
    pub fn validate(&self) -> Result<(String, String)> {
        let code = self
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("code".to_string())))?;
        let email = self
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("email".to_string())))?;
        Ok((code.to_string(), email))
    }
}

/// Wire shape returned on successful verification. `user_id` keeps its
/// snake_case name for existing clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCodeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl IssueCodeRequest {
    /// Returns the user id and the normalized email.
    pub fn validate(&self) -> Result<(String, String)> {
        let user_id = self
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                Error::Validation(ValidationError::MissingField("userId".to_string()))
            })?;
        let email = self
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::Validation(ValidationError::MissingField("email".to_string())))?;
        if !email.contains('@') {
            return Err(Error::invalid_input(format!(
                "'{}' is not an email address",
                email
            )));
        }
        Ok((user_id.to_string(), email))
    }
}

/// Acknowledgement for an issued code. The code itself is never echoed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCode {
    pub success: bool,
    pub email: String,
    pub expires_at: NaiveDateTime,
}

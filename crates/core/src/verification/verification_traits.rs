use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::verification_model::{
    IssueCodeRequest, IssuedCode, NewVerificationCode, Profile, VerificationCode,
    VerifyEmailRequest, VerifyEmailResponse,
};
use crate::errors::Result;

#[async_trait]
pub trait VerificationRepositoryTrait: Send + Sync {
    async fn insert_code(&self, new_code: NewVerificationCode) -> Result<VerificationCode>;

    /// Finds an unused code for `email` (already normalized) expiring after
    /// `now`.
    fn find_redeemable_code(
        &self,
        email: &str,
        code: &str,
        now: NaiveDateTime,
    ) -> Result<Option<VerificationCode>>;

    /// In one write, marks the code used (only if still unused) and sets
    /// `email_verified` on the owner's profile, creating it when absent.
    /// Returns `None`, changing nothing, when another caller consumed the
    /// code first.
    async fn redeem_code(&self, code: &VerificationCode) -> Result<Option<Profile>>;

    fn get_profile(&self, user_id: &str) -> Result<Profile>;
}

/// Delivers issued codes to their recipients.
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    async fn deliver(&self, email: &str, code: &str) -> Result<()>;
}

#[async_trait]
pub trait VerificationServiceTrait: Send + Sync {
    async fn issue_code(&self, request: IssueCodeRequest) -> Result<IssuedCode>;

    async fn verify(&self, request: VerifyEmailRequest) -> Result<VerifyEmailResponse>;
}

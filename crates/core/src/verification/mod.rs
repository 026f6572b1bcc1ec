//! Email verification - one-time codes issued to and redeemed by profiles.

mod verification_model;
mod verification_service;
mod verification_traits;

pub use verification_model::{
    normalize_email, IssueCodeRequest, IssuedCode, NewVerificationCode, Profile,
    VerificationCode, VerifyEmailRequest, VerifyEmailResponse, CODE_LENGTH, CODE_TTL_MINUTES,
    INVALID_CODE_MESSAGE,
};
pub use verification_service::{LoggingVerificationMailer, VerificationService};
pub use verification_traits::{
    VerificationMailer, VerificationRepositoryTrait, VerificationServiceTrait,
};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, info};
use rand::Rng;

use super::verification_model::{
    IssueCodeRequest, IssuedCode, NewVerificationCode, VerifyEmailRequest, VerifyEmailResponse,
    CODE_LENGTH, CODE_TTL_MINUTES, INVALID_CODE_MESSAGE,
};
use super::verification_traits::{
    VerificationMailer, VerificationRepositoryTrait, VerificationServiceTrait,
};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

/// Mailer that only records the delivery in the log.
#[derive(Clone, Default)]
pub struct LoggingVerificationMailer;

#[async_trait]
impl VerificationMailer for LoggingVerificationMailer {
    async fn deliver(&self, email: &str, code: &str) -> Result<()> {
        info!("Verification code for {}: {}", email, code);
        Ok(())
    }
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

pub struct VerificationService {
    repository: Arc<dyn VerificationRepositoryTrait>,
    mailer: Arc<dyn VerificationMailer>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl VerificationService {
    pub fn new(
        repository: Arc<dyn VerificationRepositoryTrait>,
        mailer: Arc<dyn VerificationMailer>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            mailer,
            event_sink,
        }
    }
}

#[async_trait]
impl VerificationServiceTrait for VerificationService {
    async fn issue_code(&self, request: IssueCodeRequest) -> Result<IssuedCode> {
        let (user_id, email) = request.validate()?;
        let code = generate_code();
        let expires_at = Utc::now().naive_utc() + Duration::minutes(CODE_TTL_MINUTES);

        let stored = self
            .repository
            .insert_code(NewVerificationCode {
                user_id,
                email: email.clone(),
                code: code.clone(),
                expires_at,
            })
            .await?;
        self.mailer.deliver(&email, &code).await?;
        debug!("Issued verification code {} for {}", stored.id, email);

        Ok(IssuedCode {
            success: true,
            email,
            expires_at: stored.expires_at,
        })
    }

    async fn verify(&self, request: VerifyEmailRequest) -> Result<VerifyEmailResponse> {
        let (code, email) = request.validate()?;
        let now = Utc::now().naive_utc();

        let record = self
            .repository
            .find_redeemable_code(&email, &code, now)?
            .ok_or_else(|| Error::Verification(INVALID_CODE_MESSAGE.to_string()))?;

        if self.repository.redeem_code(&record).await?.is_none() {
            return Err(Error::Verification(INVALID_CODE_MESSAGE.to_string()));
        }
        self.event_sink
            .emit(DomainEvent::email_verified(record.user_id.clone()));

        Ok(VerifyEmailResponse {
            success: true,
            message: "Email verified successfully".to_string(),
            user_id: record.user_id,
        })
    }
}

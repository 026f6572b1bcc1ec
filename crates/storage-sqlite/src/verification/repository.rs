use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;
use voltmarket_core::verification::{
    normalize_email, NewVerificationCode, Profile, VerificationCode, VerificationRepositoryTrait,
};
use voltmarket_core::Result;

use super::model::{ProfileDB, VerificationCodeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, OrNotFound};
use crate::schema::{profiles, verification_codes};

pub struct VerificationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VerificationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Sets `email_verified` on the profile, creating it when absent.
fn upsert_verified_profile(
    conn: &mut SqliteConnection,
    user_id: &str,
    email: &str,
) -> Result<ProfileDB> {
    let now = Utc::now().naive_utc();
    let existing = profiles::table
        .find(user_id)
        .select(ProfileDB::as_select())
        .first::<ProfileDB>(conn)
        .optional()
        .into_core()?;

    match existing {
        Some(_) => diesel::update(profiles::table.find(user_id))
            .set((
                profiles::email_verified.eq(true),
                profiles::updated_at.eq(now),
            ))
            .returning(ProfileDB::as_returning())
            .get_result::<ProfileDB>(conn)
            .into_core(),
        None => diesel::insert_into(profiles::table)
            .values(&ProfileDB {
                user_id: user_id.to_string(),
                email: email.to_string(),
                email_verified: true,
                created_at: now,
                updated_at: now,
            })
            .returning(ProfileDB::as_returning())
            .get_result::<ProfileDB>(conn)
            .into_core(),
    }
}

#[async_trait]
impl VerificationRepositoryTrait for VerificationRepository {
    async fn insert_code(&self, new_code: NewVerificationCode) -> Result<VerificationCode> {
        let row = VerificationCodeDB {
            id: Uuid::new_v4().to_string(),
            user_id: new_code.user_id,
            email: normalize_email(&new_code.email),
            code: new_code.code,
            expires_at: new_code.expires_at,
            used: false,
            created_at: Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<VerificationCode> {
                let inserted = diesel::insert_into(verification_codes::table)
                    .values(&row)
                    .returning(VerificationCodeDB::as_returning())
                    .get_result::<VerificationCodeDB>(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    fn find_redeemable_code(
        &self,
        email: &str,
        code: &str,
        now: NaiveDateTime,
    ) -> Result<Option<VerificationCode>> {
        let mut conn = get_connection(&self.pool)?;
        let row = verification_codes::table
            .filter(verification_codes::email.eq(email))
            .filter(verification_codes::code.eq(code))
            .filter(verification_codes::used.eq(false))
            .filter(verification_codes::expires_at.gt(now))
            .order(verification_codes::created_at.desc())
            .select(VerificationCodeDB::as_select())
            .first::<VerificationCodeDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(VerificationCode::from))
    }

    async fn redeem_code(&self, code: &VerificationCode) -> Result<Option<Profile>> {
        let code_id = code.id.clone();
        let user_id = code.user_id.clone();
        let email = normalize_email(&code.email);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Profile>> {
                let consumed = diesel::update(
                    verification_codes::table
                        .find(&code_id)
                        .filter(verification_codes::used.eq(false)),
                )
                .set(verification_codes::used.eq(true))
                .execute(conn)
                .into_core()?;
                if consumed != 1 {
                    return Ok(None);
                }
                let profile = upsert_verified_profile(conn, &user_id, &email)?;
                Ok(Some(profile.into()))
            })
            .await
    }

    fn get_profile(&self, user_id: &str) -> Result<Profile> {
        let mut conn = get_connection(&self.pool)?;
        profiles::table
            .find(user_id)
            .select(ProfileDB::as_select())
            .first::<ProfileDB>(&mut conn)
            .or_not_found(|| format!("Profile {}", user_id))
            .map(Profile::from)
    }
}

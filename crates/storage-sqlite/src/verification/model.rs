use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use voltmarket_core::verification::{Profile, VerificationCode};

#[derive(Queryable, Selectable, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ProfileDB {
    pub user_id: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::verification_codes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct VerificationCodeDB {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub code: String,
    pub expires_at: NaiveDateTime,
    pub used: bool,
    pub created_at: NaiveDateTime,
}

impl From<ProfileDB> for Profile {
    fn from(db: ProfileDB) -> Self {
        Self {
            user_id: db.user_id,
            email: db.email,
            email_verified: db.email_verified,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<VerificationCodeDB> for VerificationCode {
    fn from(db: VerificationCodeDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            email: db.email,
            code: db.code,
            expires_at: db.expires_at,
            used: db.used,
            created_at: db.created_at,
        }
    }
}

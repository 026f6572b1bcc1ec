//! SQLite storage implementation for profiles and email verification codes.

mod model;
mod repository;

pub use model::{ProfileDB, VerificationCodeDB};
pub use repository::VerificationRepository;

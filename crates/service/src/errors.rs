use serde::Serialize;
use thiserror::Error;

use crate::joke::domain::JokeInput;

/// One refused field and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Input handed back to the caller together with every field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    pub input: JokeInput,
    pub errors: Vec<FieldError>,
}

impl Rejected {
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", .0.fields().join(", "))]
    Validation(Rejected),
    #[error("joke {0} not found")]
    NotFound(i32),
    /// The write hit no row although the record still exists.
    #[error("concurrency conflict on joke {0}")]
    Conflict(i32),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

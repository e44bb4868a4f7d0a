//! The module contains the errors the engine can return.
//!
//! - [`InvalidAmount`] when an amount cannot be parsed or is negative.
//! - [`InvalidFilter`] when a filter names an impossible calendar period.
//! - [`Database`] when the underlying store fails.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidFilter`]: EngineError::InvalidFilter
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidFilter(a), Self::InvalidFilter(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

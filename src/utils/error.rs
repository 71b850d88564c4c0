//! Error handling for authgate
//!
//! This module defines all error types used throughout the crate.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for authgate
pub type Result<T> = std::result::Result<T, GateError>;

/// Main error type for authgate
///
/// Every variant is a load-time or configuration-time failure. A request that
/// fails to authenticate is not an error; it is the `Unauthenticated` outcome
/// (see [`crate::methods::AuthenticationOutcome`]).
#[derive(Error, Debug)]
pub enum GateError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A credential line does not match the expected grammar
    #[error("Malformed credential line: {0}")]
    MalformedLine(String),

    /// Two records in the same bundle share a key
    #[error("Duplicate credential: {0}")]
    DuplicateCredential(String),

    /// A credential source could not be loaded
    #[error("Source load error: {0}")]
    SourceLoad(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ResponseError for GateError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = match self {
            GateError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
            ),
            GateError::MalformedLine(_) | GateError::DuplicateCredential(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CREDENTIAL_ERROR",
            ),
            GateError::SourceLoad(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "SOURCE_LOAD_ERROR",
            ),
            GateError::Io(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
            ),
            GateError::Yaml(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "YAML_ERROR",
            ),
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }))
    }
}

// --- File: crates/solarify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Solarify errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for SolarifyError.
#[derive(Error, Debug)]
pub enum SolarifyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during authorization (authenticated but not allowed)
    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SolarifyError {
    fn status_code(&self) -> u16 {
        match self {
            SolarifyError::HttpError(_) => 500,
            SolarifyError::ParseError(_) => 400,
            SolarifyError::ConfigError(_) => 500,
            SolarifyError::AuthError(_) => 401,
            SolarifyError::ForbiddenError(_) => 403,
            SolarifyError::ValidationError(_) => 400,
            SolarifyError::DatabaseError(_) => 500,
            SolarifyError::ExternalServiceError { .. } => 502,
            SolarifyError::ConflictError(_) => 409,
            SolarifyError::NotFoundError(_) => 404,
            SolarifyError::TimeoutError(_) => 504,
            SolarifyError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for SolarifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SolarifyError::TimeoutError(err.to_string())
        } else {
            SolarifyError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SolarifyError {
    fn from(err: serde_json::Error) -> Self {
        SolarifyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SolarifyError {
    fn from(err: std::io::Error) -> Self {
        SolarifyError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SolarifyError {
    SolarifyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> SolarifyError {
    SolarifyError::ValidationError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> SolarifyError {
    SolarifyError::AuthError(message.to_string())
}

pub fn forbidden<T: fmt::Display>(message: T) -> SolarifyError {
    SolarifyError::ForbiddenError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SolarifyError {
    SolarifyError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> SolarifyError {
    SolarifyError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> SolarifyError {
    SolarifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> SolarifyError {
    SolarifyError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_route_mapping() {
        assert_eq!(validation_error("bad date").status_code(), 400);
        assert_eq!(auth_error("no session").status_code(), 401);
        assert_eq!(forbidden("admins only").status_code(), 403);
        assert_eq!(not_found("company 42").status_code(), 404);
        assert_eq!(conflict("sku already exists").status_code(), 409);
        assert_eq!(external_service_error("gcal", "500").status_code(), 502);
        assert_eq!(internal_error("boom").status_code(), 500);
        assert_eq!(config_error("missing smtp").status_code(), 500);
    }

    #[test]
    fn external_service_error_names_the_service() {
        let err = external_service_error("google-calendar", "freeBusy returned 503");
        assert!(err.to_string().contains("google-calendar"));
        assert!(err.to_string().contains("freeBusy returned 503"));
    }
}

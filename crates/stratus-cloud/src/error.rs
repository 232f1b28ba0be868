//! Cloud provider error types

use crate::bootstrap::Setting;
use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Unrecognized cloud provider: '{0}'")]
    UnrecognizedProvider(String),

    #[error("cannot connect to provider '{provider}': {source}")]
    Connection {
        provider: String,
        #[source]
        source: Box<CloudError>,
    },

    #[error("template does not provide enough info: {0}")]
    NotEnoughInfo(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{provider}.{operation} is not implemented")]
    NotImplemented {
        provider: String,
        operation: &'static str,
    },

    #[error("{provider}.{operation} needs a region, but none was resolved")]
    MissingRegion {
        provider: String,
        operation: &'static str,
    },

    #[error("no {setting} resolved (profile searched: '{profile}')")]
    MissingSetting { setting: Setting, profile: String },

    #[error("No such profile '{0}'")]
    UnknownProfile(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Wrap a bootstrap failure. Errors that are already connection errors
    /// pass through unchanged.
    pub fn connection(provider: impl Into<String>, cause: CloudError) -> Self {
        match cause {
            CloudError::Connection { .. } => cause,
            cause => CloudError::Connection {
                provider: provider.into(),
                source: Box::new(cause),
            },
        }
    }

    pub fn not_implemented(provider: impl Into<String>, operation: &'static str) -> Self {
        CloudError::NotImplemented {
            provider: provider.into(),
            operation,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;

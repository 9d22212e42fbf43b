//! Error types for the Clickagy adapter.
//!
//! Errors are carried as [`error_stack::Report`]s so callers keep the full
//! context chain. A response that yields no bids is not an error; see
//! [`crate::clickagy::response`].

use derive_more::{Display, Error};

/// Failures the adapter can report to its host.
#[derive(Debug, Display, Error)]
pub enum AdapterError {
    /// A mandatory field on a bid request is missing or malformed.
    #[display("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The environment could not supply a mandatory fact (the page URL).
    #[display("Environment unavailable: {message}")]
    EnvironmentUnavailable { message: String },

    /// Settings failed to load or validate.
    #[display("Configuration error: {message}")]
    Configuration { message: String },

    /// An outbound payload could not be encoded.
    #[display("Serialization error: {message}")]
    Serialization { message: String },
}

impl AdapterError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn environment(message: impl Into<String>) -> Self {
        Self::EnvironmentUnavailable {
            message: message.into(),
        }
    }
}

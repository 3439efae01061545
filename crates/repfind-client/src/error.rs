//! Registry client error types.

/// Errors from registry API calls and record normalization.
///
/// The batch path flattens every per-item error into an empty slot, but
/// single lookups keep the outcomes distinguishable: "no match" is
/// `Ok(None)`, a transport or API failure is one of the variants below.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The registry returned a non-2xx status.
    #[error("registry API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response body could not be decoded into the expected shape.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// A non-empty registration date that is not ISO-8601. Missing or
    /// empty dates are not an error; they normalize to absent.
    #[error("unparseable registration date {value:?}: {source}")]
    InvalidRegistrationDate {
        value: String,
        source: chrono::ParseError,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

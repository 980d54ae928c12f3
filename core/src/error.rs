//! Error types for the profile form core.
//!
//! # Design
//! Two families. `ApiError` covers the default-values fetch: `NotFound` gets
//! its own variant, other non-2xx responses land in `HttpError` with the raw
//! status and body. `FormError` covers misuse of the form's update entry
//! points. A field failing its rules is not an error; it is reported through
//! `ValidationErrors`.

use thiserror::Error;

/// Errors returned by `DefaultsClient::parse_fetch_defaults`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested user does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The response parsed but carried no usable `email` string.
    #[error("response has no email field")]
    MissingEmail,

    /// The host could not complete the round-trip at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors returned by `ProfileForm` and `PhoneList` mutators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field path `{0}`")]
    UnknownField(String),

    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The first phone entry cannot be removed through the form.
    #[error("entry {0} cannot be removed")]
    ProtectedEntry(usize),
}

//! Caller-facing error taxonomy.
//!
//! Every variant except [`Internal`](CoreError::Internal) is an expected,
//! recoverable condition that the transport layer maps to a distinct
//! caller-visible outcome. None are fatal to the process.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An identity with the given email is already registered.
    #[error("An identity with this email is already registered")]
    DuplicateIdentity,

    /// The email/secret pair does not match any registered identity.
    ///
    /// Deliberately does not say which of the two fields was wrong.
    #[error("Invalid email or secret")]
    InvalidCredentials,

    /// The bearer token is absent, malformed, expired, or revoked.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Required listing fields were empty or absent.
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    /// A failure that should never occur at runtime (e.g. the hashing
    /// layer rejecting its own parameters). Surfaced without detail.
    #[error("Internal error: {0}")]
    Internal(String),
}

use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token subject must not be empty")]
    EmptySubject,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reason a presented token was rejected.
///
/// Variants are listed in the order the verifier checks them; the first
/// failing check decides the reason.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenInvalid {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token was issued by an unexpected issuer")]
    WrongIssuer,

    #[error("Token is expired")]
    Expired,
}

/// Error for signing secret construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Token signing secret must not be empty")]
    Empty,
}

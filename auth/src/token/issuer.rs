use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::FixedOffset;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::TokenClaims;
use super::errors::TokenError;
use super::secret::SigningSecret;

/// Issuer name embedded in and required of every token.
pub const ISSUER: &str = "forumhub";

/// How long a token stays valid after issuance.
pub const TOKEN_VALIDITY_HOURS: i64 = 2;

/// Offset (seconds west of UTC) of the zone expiry is computed in.
///
/// Expiry is always computed against UTC-03:00, whatever the host zone is.
pub const EXPIRY_ZONE_WEST_SECONDS: i32 = 3 * 3600;

/// The fixed UTC-03:00 zone used for token timestamps.
pub fn expiry_zone() -> FixedOffset {
    FixedOffset::west_opt(EXPIRY_ZONE_WEST_SECONDS).expect("UTC-03:00 is a valid offset")
}

/// A signed token as handed to callers.
///
/// `value` is the opaque string sent over the wire; the other fields are a
/// convenience copy of what it asserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    subject: String,
    issued_at: DateTime<FixedOffset>,
    expires_at: DateTime<FixedOffset>,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issued_at(&self) -> DateTime<FixedOffset> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<FixedOffset> {
        self.expires_at
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Builds signed, time-bounded tokens asserting a subject.
///
/// Uses HS256 (HMAC with SHA-256) over the JWS compact encoding, whose
/// dot-separated base64url segments keep field boundaries unambiguous.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    validity: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer: ISSUER.to_string(),
            validity: Duration::hours(TOKEN_VALIDITY_HOURS),
        }
    }

    /// Issue a token for `subject`, valid from now.
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty or whitespace
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<Token, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    ///
    /// # Arguments
    /// * `subject` - Email of the identity the token asserts
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// Token expiring `TOKEN_VALIDITY_HOURS` after `now`, timestamps in UTC-03:00
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty or whitespace
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<Token, TokenError> {
        if subject.trim().is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let issued_at = now.with_timezone(&expiry_zone());
        let expires_at = issued_at + self.validity;

        let claims = TokenClaims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(Token {
            value,
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }
}

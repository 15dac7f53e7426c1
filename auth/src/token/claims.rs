use serde::Deserialize;
use serde::Serialize;

/// Claims carried by every forumhub token.
///
/// Field names follow RFC 7519 so the payload is a standard JWT claim set.
/// All four are required: a token missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Issuer
    pub iss: String,

    /// Subject (email of the identity the token asserts)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Check if token is expired.
    ///
    /// A token is valid strictly before `exp`; the expiry second itself is
    /// already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

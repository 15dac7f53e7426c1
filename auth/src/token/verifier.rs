use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenInvalid;
use super::issuer::ISSUER;
use super::secret::SigningSecret;

/// Validates tokens produced by [`TokenIssuer`](super::TokenIssuer).
///
/// Checks run in a fixed order and stop at the first failure:
/// structure, signature, issuer, expiry.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    issuer: String,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed with `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: ISSUER.to_string(),
        }
    }

    /// Verify a token against the current time.
    ///
    /// # Returns
    /// The token's subject, verbatim
    ///
    /// # Errors
    /// * `Malformed` - Not a well-formed token
    /// * `BadSignature` - Signature does not match this verifier's secret
    /// * `WrongIssuer` - Issued by someone else
    /// * `Expired` - Validity window has passed
    pub fn verify(&self, token: &str) -> Result<String, TokenInvalid> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenInvalid> {
        self.parse(token)?;

        let claims = self.check_signature(token)?;

        if claims.iss != self.issuer {
            return Err(TokenInvalid::WrongIssuer);
        }

        if claims.is_expired(now.timestamp()) {
            return Err(TokenInvalid::Expired);
        }

        Ok(claims.sub)
    }

    /// Structural parse: header and claims must decode before anything else
    /// is looked at.
    fn parse(&self, token: &str) -> Result<TokenClaims, TokenInvalid> {
        jsonwebtoken::decode_header(token).map_err(|_| TokenInvalid::Malformed)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenInvalid::Malformed)
    }

    fn check_signature(&self, token: &str) -> Result<TokenClaims, TokenInvalid> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Issuer and expiry are checked afterwards, in that order
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenInvalid::BadSignature
                }
                _ => TokenInvalid::Malformed,
            })
    }
}

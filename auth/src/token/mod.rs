pub mod claims;
pub mod errors;
pub mod issuer;
pub mod secret;
pub mod verifier;

pub use claims::TokenClaims;
pub use errors::SecretError;
pub use errors::TokenError;
pub use errors::TokenInvalid;
pub use issuer::Token;
pub use issuer::TokenIssuer;
pub use issuer::ISSUER;
pub use issuer::TOKEN_VALIDITY_HOURS;
pub use secret::SigningSecret;
pub use verifier::TokenVerifier;

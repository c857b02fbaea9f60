//! Credential codec implementation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::domain::entities::app::App;
use crate::domain::entities::token::{Claims, VerifiedUser};
use crate::domain::entities::user::User;
use crate::errors::TokenError;

/// Optional prefix accepted in front of a presented token
pub const BEARER_PREFIX: &str = "Bearer ";

/// Remove a leading `Bearer ` prefix and surrounding whitespace.
/// A bare `Bearer` leaves an empty credential.
pub fn strip_bearer(token: &str) -> &str {
    let token = token.trim_start();
    let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
    if token == BEARER_PREFIX.trim_end() {
        ""
    } else {
        token
    }
}

/// Signs and verifies credentials with a caller-supplied tenant secret
#[derive(Debug, Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    validation: Validation,
    peek_validation: Validation,
}

impl TokenCodec {
    /// Creates a codec that signs with HS256 and accepts any HMAC variant
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims(&["exp"]);
        // Expiry is compared strictly in `verify`
        validation.validate_exp = false;
        validation.leeway = 0;

        let mut peek_validation = Validation::new(Algorithm::HS256);
        peek_validation.insecure_disable_signature_validation();
        peek_validation.required_spec_claims.clear();
        peek_validation.validate_exp = false;

        Self {
            algorithm: Algorithm::HS256,
            validation,
            peek_validation,
        }
    }

    /// Issues a signed token for `user` under `app`
    ///
    /// # Arguments
    ///
    /// * `user` - Subject of the token
    /// * `app` - Tenant whose secret signs the token
    /// * `ttl` - Lifetime, `exp` is set to now + ttl
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact encoded token
    /// * `Err(TokenError::TokenGenerationFailed)` - Signer failure
    pub fn issue(&self, user: &User, app: &App, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims::new(user, app, ttl);
        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(app.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(app_id = app.id, error = %e, "Failed to sign token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies `token` against `secret` and extracts the subject
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedUser)` - Signature valid, not expired, claims well-typed
    /// * `Err(TokenError::MissingToken)` - Empty input
    /// * `Err(TokenError::UnexpectedAlgorithm)` - Header names a non-HMAC algorithm
    /// * `Err(TokenError::InvalidToken)` - Malformed, bad signature or expired
    /// * `Err(TokenError::MissingSubject)` - No numeric `uid`
    /// * `Err(TokenError::MissingEmail)` - No string `email`
    pub fn verify(&self, token: &str, secret: &str) -> Result<VerifiedUser, TokenError> {
        let token = strip_bearer(token);
        if token.is_empty() {
            return Err(TokenError::MissingToken);
        }

        // jsonwebtoken cannot parse `none` or unknown algorithms at all
        if header_algorithm(token).is_some_and(|alg| !alg.starts_with("HS")) {
            return Err(TokenError::UnexpectedAlgorithm);
        }

        let data = decode::<Map<String, Value>>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
            _ => TokenError::InvalidToken,
        })?;
        let claims = data.claims;

        let exp = claims
            .get("exp")
            .and_then(numeric_claim)
            .ok_or(TokenError::InvalidToken)?;
        if exp <= Utc::now().timestamp() {
            return Err(TokenError::InvalidToken);
        }

        let user_id = claims
            .get("uid")
            .and_then(numeric_claim)
            .ok_or(TokenError::MissingSubject)?;
        let email = claims
            .get("email")
            .and_then(Value::as_str)
            .ok_or(TokenError::MissingEmail)?;

        Ok(VerifiedUser {
            user_id,
            email: email.to_string(),
        })
    }

    /// Reads the `app_id` claim without checking the signature.
    ///
    /// Only used to pick which tenant secret to verify with; the result must
    /// never be trusted on its own.
    pub fn peek_app_id(&self, token: &str) -> Option<i32> {
        let token = strip_bearer(token);
        if token.is_empty() {
            return None;
        }
        let data = decode::<Map<String, Value>>(
            token,
            &DecodingKey::from_secret(&[]),
            &self.peek_validation,
        )
        .ok()?;
        data.claims
            .get("app_id")
            .and_then(numeric_claim)
            .and_then(|id| i32::try_from(id).ok())
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// The raw `alg` field of the header segment
fn header_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')).ok()?;
    let header: Value = serde_json::from_slice(&bytes).ok()?;
    header.get("alg")?.as_str().map(str::to_string)
}

/// Integer claims may arrive as JSON floats; fractional parts are truncated
fn numeric_claim(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

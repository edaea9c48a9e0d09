//! Password hashing and bearer token handling.
//!
//! Tokens are HS256 JWTs carrying the admin's email as subject and a 24 hour
//! expiry. Verification distinguishes an expired token from a malformed one
//! so the 401 can say which it was.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kuber_core::Email;

/// How long a minted token stays valid.
const TOKEN_TTL_HOURS: i64 = 24;

/// Token verification failures, each with a distinguishing reason.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token's expiry has passed.
    #[error("Token expired")]
    Expired,
    /// The token is malformed, has a bad signature, or couldn't be minted.
    #[error("Invalid token")]
    Invalid,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Hash a password with bcrypt at the default cost.
///
/// # Errors
///
/// Returns `bcrypt::BcryptError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Verify a password against a stored bcrypt hash.
///
/// An unparseable stored hash counts as a mismatch rather than an error, so
/// login failures stay uniform.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Mint a bearer token for an admin.
///
/// # Errors
///
/// Returns `TokenError::Invalid` if signing fails.
pub fn mint_token(secret: &SecretString, email: &Email) -> Result<String, TokenError> {
    let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    mint_token_with_expiry(secret, email, expires_at.timestamp())
}

fn mint_token_with_expiry(
    secret: &SecretString,
    email: &Email,
    exp: i64,
) -> Result<String, TokenError> {
    let claims = Claims {
        sub: email.as_str().to_owned(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| TokenError::Invalid)
}

/// Verify a bearer token and return the subject email.
///
/// # Errors
///
/// Returns `TokenError::Expired` for a past expiry, `TokenError::Invalid`
/// for anything else (bad signature, malformed token, missing subject).
pub fn verify_token(secret: &SecretString, token: &str) -> Result<String, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;

    Ok(data.claims.sub)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("kx91m4Vq7TnB2wPzR8cY5sLdJ0aHgF6u")
    }

    fn email() -> Email {
        Email::parse("admin@kuber.com").unwrap()
    }

    #[test]
    fn test_password_roundtrip() {
        // Low cost keeps the test fast; production uses DEFAULT_COST.
        let hash = bcrypt::hash("admin123", 4).unwrap();
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_password_bad_hash_is_mismatch() {
        assert!(!verify_password("admin123", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_token_roundtrip() {
        let token = mint_token(&secret(), &email()).unwrap();
        let subject = verify_token(&secret(), &token).unwrap();
        assert_eq!(subject, "admin@kuber.com");
    }

    #[test]
    fn test_expired_token_distinguished() {
        let past = Utc::now().timestamp() - 3600;
        let token = mint_token_with_expiry(&secret(), &email(), past).unwrap();
        assert_eq!(verify_token(&secret(), &token), Err(TokenError::Expired));
    }

    #[test]
    fn test_malformed_token_invalid() {
        assert_eq!(
            verify_token(&secret(), "not.a.token"),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_wrong_secret_invalid() {
        let token = mint_token(&secret(), &email()).unwrap();
        let other = SecretString::from("Zq04nW8yE3rT6uI9oP1aS5dF7gH2jKlX");
        assert_eq!(verify_token(&other, &token), Err(TokenError::Invalid));
    }
}

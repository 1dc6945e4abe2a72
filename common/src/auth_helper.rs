use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Well-formed Argon2 hash that matches no password. Login verifies against
/// it when the email is unknown so the 401 path does similar work whether
/// the account exists or not.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$MTIzNDU2Nzg5MDEyMzQ1Ng$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid subject claim")]
    InvalidSubject,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Issues an HS256 bearer token whose subject is the user id.
pub fn create_token(
    secret: &str,
    user_id: i64,
    ttl_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies signature and expiry, returning the user id carried in `sub`.
pub fn decode_token(secret: &str, token: &str) -> Result<i64, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    data.claims
        .sub
        .parse::<i64>()
        .map_err(|_| TokenError::InvalidSubject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("s3cret-pa55").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "s3cret-pa55"));
        assert!(!verify_password(&hash, "wrong-password"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("repeatable").unwrap();
        let b = hash_password("repeatable").unwrap();
        assert_ne!(a, b, "salts must differ");
    }

    #[test]
    fn dummy_hash_matches_nothing() {
        assert!(!verify_password(DUMMY_HASH, ""));
        assert!(!verify_password(DUMMY_HASH, "password"));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[test]
    fn token_round_trips_user_id() {
        let token = create_token("unit-test-secret", 42, 24).unwrap();
        let user_id = decode_token("unit-test-secret", &token).unwrap();
        assert_eq!(user_id, 42);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let token = create_token("secret-a", 7, 24).unwrap();
        assert!(decode_token("secret-b", &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = create_token("unit-test-secret", 7, -2).unwrap();
        assert!(decode_token("unit-test-secret", &token).is_err());
    }
}

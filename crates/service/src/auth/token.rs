//! HS256 session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use models::user::Role;
use serde::{Deserialize, Serialize};

use super::domain::AuthUser;
use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

pub fn issue(user: &AuthUser, secret: &str, ttl_hours: i64) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.email.clone(),
        uid: user.id.to_string(),
        role: user.role,
        iat: now.timestamp().max(0) as usize,
        exp: (now + Duration::hours(ttl_hours)).timestamp().max(0) as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Verify signature and expiry.
pub fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> AuthUser {
        AuthUser { id: Uuid::new_v4(), name: "Mike".into(), email: "mike@example.com".into(), role: Role::Business, city: "New York".into() }
    }

    #[test]
    fn issue_and_verify() {
        let u = user();
        let t = issue(&u, "secret", 12).unwrap();
        let c = verify(&t, "secret").unwrap();
        assert_eq!(c.uid, u.id.to_string());
        assert_eq!(c.sub, "mike@example.com");
        assert_eq!(c.role, Role::Business);
        assert!(c.exp > c.iat);
    }

    #[test]
    fn wrong_secret_rejected() {
        let t = issue(&user(), "secret", 12).unwrap();
        assert!(matches!(verify(&t, "other"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_rejected() {
        let t = issue(&user(), "secret", -2).unwrap();
        assert!(matches!(verify(&t, "secret"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_rejected() {
        assert!(verify("abc.def.ghi", "secret").is_err());
    }
}

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use storage::models::User;
use uuid::Uuid;

use crate::error::WebError;

/// Signed session payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user ID
    pub username: String,
    pub is_superuser: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, ttl_minutes: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(ttl_minutes as i64);

        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            is_superuser: user.is_superuser,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn user_id(&self) -> Result<Uuid, WebError> {
        Uuid::parse_str(&self.sub).map_err(|_| WebError::Unauthorized)
    }
}

/// Issues and verifies session tokens; also carries the cookie settings
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: u64,
    secure_cookies: bool,
}

impl SessionService {
    pub fn new(secret: &str, ttl_minutes: u64, secure_cookies: bool) -> Self {
        let secret = secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_minutes,
            secure_cookies,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_minutes * 60
    }

    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    pub fn issue(&self, user: &User) -> Result<String, WebError> {
        let claims = Claims::new(user, self.ttl_minutes);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| WebError::InternalServerError(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, WebError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                WebError::Unauthorized
            })?;

        Ok(token_data.claims)
    }
}

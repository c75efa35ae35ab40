//! Authentication service - token codec and credential checks.
//!
//! Issues and verifies the signed, time-limited bearer tokens carrying a
//! subject id and role. Verification is pure: no database lookup happens,
//! so a token keeps its embedded role until it expires.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::domain::{Password, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::entities::user;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate by username/password and return a signed token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Issue a token for a subject with the given role
    fn issue_token(&self, user_id: i32, role: Role) -> AppResult<String>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Issue a signed token (shared helper)
fn issue_token_internal(user_id: i32, role: Role, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.token_ttl_hours);

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token encoding failed: {}", e)))
}

/// Verify a token and extract claims (shared helper).
///
/// Expired and malformed tokens are distinguished internally but both map
/// to the same rejection class; only the message differs.
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            AppError::TokenInvalid("Token expired. Please log in again.".to_string())
        }
        _ => AppError::TokenInvalid("Invalid token. Please log in again.".to_string()),
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    db: DatabaseConnection,
    config: Config,
}

impl Authenticator {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self { db, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user_result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        // Verify against a dummy hash when the user is unknown so the
        // response time does not reveal which usernames exist.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let password_hash = match &user_result {
            Some(user) => user.password.as_str(),
            None => dummy_hash,
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        match user_result {
            Some(model) if password_valid => {
                let user = crate::domain::User::from(model);
                let token = issue_token_internal(user.id, user.role, &self.config)?;
                Ok(TokenResponse { token })
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn issue_token(&self, user_id: i32, role: Role) -> AppResult<String> {
        issue_token_internal(user_id, role, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(ttl_hours: i64) -> Config {
        Config::with_secret("unit-test-secret-key-of-32-chars!!", ttl_hours)
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config(24);
        let token = issue_token_internal(7, Role::Admin, &config).unwrap();

        let claims = verify_token_internal(&token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
        // 24 hour lifetime
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts the expiry in the past, beyond validation leeway
        let config = test_config(-1);
        let token = issue_token_internal(7, Role::Admin, &config).unwrap();

        let err = verify_token_internal(&token, &config).unwrap_err();
        match err {
            AppError::TokenInvalid(msg) => {
                assert_eq!(msg, "Token expired. Please log in again.")
            }
            other => panic!("expected TokenInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_token_rejected() {
        let config = test_config(24);

        let err = verify_token_internal("not-a-token", &config).unwrap_err();
        match err {
            AppError::TokenInvalid(msg) => {
                assert_eq!(msg, "Invalid token. Please log in again.")
            }
            other => panic!("expected TokenInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let config = test_config(24);
        let other = Config::with_secret("another-secret-key-of-32-chars!!!", 24);

        let token = issue_token_internal(7, Role::User, &config).unwrap();
        assert!(verify_token_internal(&token, &other).is_err());
    }
}

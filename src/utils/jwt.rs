use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::RoleEnum;

/// Claims embedded in the session token: user id, username and role, with a
/// fixed expiry set at issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i32,
    pub username: String,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn create_token(
        &self,
        user_id: i32,
        username: &str,
        role: RoleEnum,
        expiry_seconds: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            user_id,
            username: username.to_string(),
            role,
            iat: now,
            exp: now + expiry_seconds,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_claims() {
        let jwt = JwtManager::new("test-secret");
        let token = jwt
            .create_token(7, "teacher", RoleEnum::Teacher, 86400)
            .unwrap();

        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "teacher");
        assert_eq!(claims.role, RoleEnum::Teacher);
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = JwtManager::new("one")
            .create_token(1, "admin", RoleEnum::Admin, 86400)
            .unwrap();
        assert!(JwtManager::new("two").verify(&token).is_err());
    }
}

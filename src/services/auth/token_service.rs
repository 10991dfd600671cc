//! JWT 토큰 관리 서비스 구현
//!
//! HS256 서명 액세스 토큰의 발급과 검증을 담당합니다.
//! 토큰은 `sub`(사용자 ID), `name`, `iat`, `exp` 클레임만 포함하며
//! 기본 유효 기간은 90일(`JWT_EXPIRATION_DAYS`)입니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    config::JwtConfig,
    core::errors::AppError,
    domain::entities::users::user::User,
    domain::models::token::TokenClaims,
};

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하며 시크릿은 `JWT_SECRET`에서 읽습니다.
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장되지 않은 사용자(ID 없음) 또는 서명 실패
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let claims = build_claims(user, Utc::now(), JwtConfig::expiration_days())?;
        encode_claims(&claims, &JwtConfig::secret())
    }

    /// 토큰 서명과 만료 시간을 검증하고 클레임을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 서명 불일치, 형식 오류
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode_claims(token, &JwtConfig::secret())
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        extract_bearer_token(auth_header)
    }
}

pub fn build_claims(user: &User, now: DateTime<Utc>, expiration_days: i64) -> Result<TokenClaims, AppError> {
    let sub = user.id_string().ok_or_else(|| {
        AppError::InternalError("사용자 ID가 없습니다".to_string())
    })?;

    Ok(TokenClaims {
        sub,
        name: user.name.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::days(expiration_days)).timestamp(),
    })
}

pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String, AppError> {
    let encoding_key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
}

pub fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());

    decode::<TokenClaims>(token, &decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            }
            _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
        })
}

/// `Authorization` 헤더 값에서 `Bearer ` 접두사를 제거합니다.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    const SECRET: &str = "test-secret";

    fn stored_user() -> User {
        let mut user = User::new("alan".to_string(), "alan@example.com".to_string(), "hash".to_string());
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_token_round_trip_keeps_identity() {
        let user = stored_user();
        let claims = build_claims(&user, Utc::now(), 90).unwrap();

        let token = encode_claims(&claims, SECRET).unwrap();
        let decoded = decode_claims(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, user.id_string().unwrap());
        assert_eq!(decoded.name, "alan");
        assert_eq!(decoded.exp - decoded.iat, 90 * 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = build_claims(&stored_user(), Utc::now() - Duration::days(10), 1).unwrap();
        let token = encode_claims(&claims, SECRET).unwrap();

        let result = decode_claims(&token, SECRET);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = build_claims(&stored_user(), Utc::now(), 1).unwrap();
        let token = encode_claims(&claims, SECRET).unwrap();

        assert!(matches!(
            decode_claims(&token, "other-secret"),
            Err(AppError::AuthenticationError(_))
        ));
        assert!(matches!(
            decode_claims("not.a.jwt", SECRET),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_unsaved_user_cannot_get_token() {
        let user = User::new("alan".to_string(), "alan@example.com".to_string(), "hash".to_string());
        assert!(matches!(build_claims(&user, Utc::now(), 1), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_bearer_token("Basic dXNlcg==").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("abc.def.ghi").is_err());
    }
}

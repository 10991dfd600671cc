//! # 인증 코드 리포지토리
//!
//! 이메일 인증 코드를 Redis에만 저장합니다. 값은 코드 원문이 아닌
//! SHA-256 해시(16진수)이며, TTL이 지나면 Redis가 자동으로 제거합니다.
//!
//! ## 키 형식
//!
//! ```text
//! {email}-code-{purpose}     예) alan@example.com-code-register
//! ```

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;
use crate::caching::redis::RedisClient;
use crate::core::errors::{AppError, ErrorCode};
use crate::core::registry::Repository;

/// 인증 코드 해시 저장소
///
/// `MailService`의 발급/검증 흐름은 이 트레이트에만 의존합니다.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// 키가 비어 있을 때만 저장합니다. 이미 있으면 `EmailCodeNotExpired` (1009).
    async fn save_code(&self, key: &str, code_digest: &str, ttl_seconds: u64) -> Result<(), AppError>;

    /// 만료되었거나 없으면 `None`.
    async fn find_code(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn remove_code(&self, key: &str) -> Result<(), AppError>;
}

#[repository(name = "verification", collection = "verification_codes")]
pub struct VerificationRepository {
    redis: Arc<RedisClient>,
}

#[async_trait]
impl CodeStore for VerificationRepository {
    /// # Errors
    ///
    /// * `ErrorCode::EmailCodeNotExpired` (1009) - 이전 코드의 TTL이 남아 있는 경우
    /// * `AppError::RedisError` - Redis 통신 오류
    async fn save_code(&self, key: &str, code_digest: &str, ttl_seconds: u64) -> Result<(), AppError> {
        let stored = self.redis
            .set_nx_with_expiry(key, &code_digest, ttl_seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        if !stored {
            log::debug!("⏳ 인증 코드가 아직 유효합니다: {}", key);
            return Err(AppError::Business(ErrorCode::EmailCodeNotExpired));
        }

        Ok(())
    }

    async fn find_code(&self, key: &str) -> Result<Option<String>, AppError> {
        self.redis
            .get::<String>(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn remove_code(&self, key: &str) -> Result<(), AppError> {
        self.redis
            .del(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}

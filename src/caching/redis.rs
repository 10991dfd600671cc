//! # Redis 캐시 클라이언트
//!
//! 사용자 조회 캐시와 이메일 인증 코드 저장에 사용하는 Redis 클라이언트입니다.
//! 모든 값은 JSON 문자열로 저장되며, 연결은 요청마다 멀티플렉싱된
//! 비동기 연결을 사용합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let redis = RedisClient::new().await?;
//!
//! // 사용자 캐시 (10분)
//! redis.set_with_expiry("user:email:a@b.com", &user, 600).await?;
//!
//! // 인증 코드: 키가 없을 때만 저장
//! let stored = redis.set_nx_with_expiry("a@b.com-code-login", &digest, 300).await?;
//! ```

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

fn serialization_error(e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string()))
}

impl RedisClient {
    /// 클라이언트를 생성하고 `PING`으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(DatabaseConfig::redis_url())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string()))
                })
            })
            .transpose()
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(serialization_error)?;
        conn.set(key, json).await
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: usize) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(serialization_error)?;
        conn.set_ex(key, json, seconds as u64).await
    }

    /// 키가 존재하지 않을 때만 TTL과 함께 저장합니다 (`SET key value NX EX seconds`).
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 새로 저장됨
    /// * `Ok(false)` - 키가 이미 존재하여 저장하지 않음
    pub async fn set_nx_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<bool, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(serialization_error)?;

        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(json)
            .arg("NX")
            .arg("EX")
            .arg(seconds)
            .query_async(&mut conn)
            .await?;

        Ok(reply.is_some())
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.keys(pattern).await
    }
}

impl Default for RedisClient {
    /// 연결 확인 없이 클라이언트만 생성합니다. URL 형식이 잘못된 경우 패닉합니다.
    fn default() -> Self {
        let client = Client::open(DatabaseConfig::redis_url())
            .expect("Failed to create Redis client with default configuration");

        Self { client }
    }
}

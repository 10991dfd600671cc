//! 외부 연동(메일 API, 오브젝트 스토리지) 설정

use std::env;
use std::time::Duration;

/// 인증 코드 메일 발송용 HTTP 메일 API 설정
pub struct MailConfig;

impl MailConfig {
    pub fn api_base_url() -> String {
        env::var("EMAIL_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.postmarkapp.com".to_string())
    }

    /// 발신자 주소. 예: `Chat <no-reply@example.com>`
    pub fn sender() -> String {
        env::var("EMAIL_SENDER").unwrap_or_else(|_| "no-reply@localhost".to_string())
    }

    pub fn auth_token() -> String {
        env::var("EMAIL_AUTH_TOKEN").unwrap_or_else(|_| {
            log::warn!("EMAIL_AUTH_TOKEN not set, mail delivery will be rejected");
            String::new()
        })
    }

    pub fn timeout() -> Duration {
        let millis = env::var("EMAIL_TIMEOUT_MILLIS")
            .ok()
            .and_then(|ms| ms.parse().ok())
            .unwrap_or(10_000);
        Duration::from_millis(millis)
    }
}

/// Qiniu 오브젝트 스토리지 업로드 설정
pub struct StorageConfig;

impl StorageConfig {
    pub fn access_key() -> String {
        env::var("QINIU_ACCESS_KEY").unwrap_or_default()
    }

    pub fn secret_key() -> String {
        env::var("QINIU_SECRET_KEY").unwrap_or_default()
    }

    pub fn bucket() -> String {
        env::var("QINIU_BUCKET").unwrap_or_default()
    }

    /// 업로드 객체 키 접두사. 예: `chat/`
    pub fn key_prefix() -> String {
        env::var("QINIU_KEY_PREFIX").unwrap_or_default()
    }

    /// 공개 접근 URL 접두사. 예: `https://cdn.example.com/`
    pub fn url_prefix() -> String {
        env::var("QINIU_URL_PREFIX").unwrap_or_default()
    }

    /// 폼 업로드 엔드포인트. 기본값은 싱가포르 리전
    pub fn upload_host() -> String {
        env::var("QINIU_UPLOAD_HOST").unwrap_or_else(|_| "https://up-as0.qiniup.com".to_string())
    }

    pub fn token_ttl_seconds() -> i64 {
        env::var("QINIU_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|ttl| ttl.parse().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(3600)
    }

    /// 업로드 허용 최대 크기(바이트). 기본값 10MB
    pub fn max_file_bytes() -> usize {
        env::var("UPLOAD_MAX_BYTES")
            .ok()
            .and_then(|bytes| bytes.parse().ok())
            .filter(|bytes| *bytes > 0)
            .unwrap_or(10 * 1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_timeout_default() {
        if env::var("EMAIL_TIMEOUT_MILLIS").is_err() {
            assert_eq!(MailConfig::timeout(), Duration::from_secs(10));
        }
    }

    #[test]
    fn test_storage_defaults() {
        if env::var("QINIU_UPLOAD_HOST").is_err() {
            assert_eq!(StorageConfig::upload_host(), "https://up-as0.qiniup.com");
        }
        if env::var("UPLOAD_MAX_BYTES").is_err() {
            assert_eq!(StorageConfig::max_file_bytes(), 10 * 1024 * 1024);
        }
        if env::var("QINIU_TOKEN_TTL_SECONDS").is_err() {
            assert_eq!(StorageConfig::token_ttl_seconds(), 3600);
        }
    }
}

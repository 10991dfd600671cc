//! # 파일 업로드 서비스
//!
//! Qiniu 오브젝트 스토리지 폼 업로드 API로 파일을 업로드하고 공개 URL을 반환합니다.
//!
//! ## 업로드 토큰
//!
//! ```text
//! policy  = {"scope":"{bucket}:{key_prefix}","deadline":<unix>,"isPrefixalScope":1}
//! encoded = urlsafe_base64(policy)
//! sign    = urlsafe_base64(hmac_sha1(secret_key, encoded))
//! token   = "{access_key}:{sign}:{encoded}"
//! ```
//!
//! 접두사 범위(`isPrefixalScope`) 토큰이므로 `key_prefix`로 시작하는 키에만
//! 업로드할 수 있습니다.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use once_cell::sync::OnceCell;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use uuid::Uuid;
use crate::config::StorageConfig;
use crate::core::errors::{AppError, ErrorCode};
use crate::core::registry::{Service, ServiceRegistration};

type HmacSha1 = Hmac<Sha1>;

#[derive(Debug, Serialize)]
struct PutPolicy {
    scope: String,
    deadline: i64,
    #[serde(rename = "isPrefixalScope")]
    is_prefixal_scope: u8,
}

/// 폼 업로드 성공 응답
#[derive(Debug, Deserialize)]
struct PutResult {
    key: String,
    #[allow(dead_code)]
    hash: Option<String>,
}

pub struct UploadService {
    http_client: reqwest::Client,
}

static UPLOAD_SERVICE_INSTANCE: OnceCell<Arc<UploadService>> = OnceCell::new();

impl UploadService {
    pub fn instance() -> Arc<Self> {
        UPLOAD_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self {
                    http_client: reqwest::Client::new(),
                })
            })
            .clone()
    }

    /// 현재 설정으로 `now` 기준 업로드 토큰을 발급합니다.
    pub fn upload_token(&self, now: i64) -> Result<String, AppError> {
        sign_upload_token(
            &StorageConfig::access_key(),
            &StorageConfig::secret_key(),
            &format!("{}:{}", StorageConfig::bucket(), StorageConfig::key_prefix()),
            now + StorageConfig::token_ttl_seconds(),
        )
    }

    /// 파일 바이트를 업로드하고 공개 URL을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `ErrorCode::FileUploadFailed` (600) - 크기 초과, 토큰 생성 실패, 업로드 요청 실패
    pub async fn upload_bytes(&self, filename: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        if bytes.len() > StorageConfig::max_file_bytes() {
            log::warn!("⚠️ 업로드 크기 초과: {} ({} bytes)", filename, bytes.len());
            return Err(AppError::Business(ErrorCode::FileUploadFailed));
        }

        let token = self.upload_token(chrono::Utc::now().timestamp())
            .map_err(|e| {
                log::error!("❌ 업로드 토큰 생성 실패: {}", e);
                AppError::Business(ErrorCode::FileUploadFailed)
            })?;

        let key = format!("{}{}", StorageConfig::key_prefix(), generate_file_name(filename));
        let size = bytes.len();

        let form = Form::new()
            .text("token", token)
            .text("key", key.clone())
            .part("file", Part::bytes(bytes).file_name(filename.to_string()));

        let started = std::time::Instant::now();

        let result = self.put(form).await.map_err(|e| {
            log::error!("❌ 파일 업로드 실패 ({}): {}", key, e);
            AppError::Business(ErrorCode::FileUploadFailed)
        })?;

        log::info!(
            "📤 파일 업로드 완료: {} ({} bytes, {}ms)",
            result.key,
            size,
            started.elapsed().as_millis()
        );

        Ok(format!("{}{}", StorageConfig::url_prefix(), result.key))
    }

    async fn put(&self, form: Form) -> Result<PutResult, reqwest::Error> {
        self.http_client
            .post(StorageConfig::upload_host())
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<PutResult>()
            .await
    }
}

#[async_trait]
impl Service for UploadService {
    fn name(&self) -> &str {
        "upload_service"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

fn construct_upload_service() -> Box<dyn Any + Send + Sync> {
    Box::new(UploadService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "upload_service",
        constructor: construct_upload_service,
    }
}

/// UUID v4에 원본 파일의 확장자를 붙인 저장용 파일 이름
///
/// `photo.png` → `3f1c...-....png`, 확장자가 없으면 UUID만 사용합니다.
pub fn generate_file_name(original: &str) -> String {
    let uuid = Uuid::new_v4();

    match Path::new(original).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", uuid, ext),
        _ => uuid.to_string(),
    }
}

pub fn sign_upload_token(access_key: &str, secret_key: &str, scope: &str, deadline: i64) -> Result<String, AppError> {
    let policy = PutPolicy {
        scope: scope.to_string(),
        deadline,
        is_prefixal_scope: 1,
    };

    let policy_json = serde_json::to_string(&policy)
        .map_err(|e| AppError::InternalError(format!("업로드 정책 직렬화 실패: {}", e)))?;
    let encoded_policy = general_purpose::URL_SAFE.encode(policy_json);

    let mut mac = HmacSha1::new_from_slice(secret_key.as_bytes())
        .map_err(|e| AppError::InternalError(format!("HMAC 키 오류: {}", e)))?;
    mac.update(encoded_policy.as_bytes());
    let encoded_sign = general_purpose::URL_SAFE.encode(mac.finalize().into_bytes());

    Ok(format!("{}:{}:{}", access_key, encoded_sign, encoded_policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_file_name_keeps_extension() {
        let name = generate_file_name("avatar.png");
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), 36 + 4);
        assert!(Uuid::parse_str(&name[..36]).is_ok());

        assert!(generate_file_name("archive.tar.gz").ends_with(".gz"));
        assert!(generate_file_name("photo.jpeg").ends_with(".jpeg"));
    }

    #[test]
    fn test_generate_file_name_without_extension() {
        let name = generate_file_name("README");
        assert_eq!(name.len(), 36);
        assert!(Uuid::parse_str(&name).is_ok());
    }

    #[test]
    fn test_generate_file_name_is_unique() {
        assert_ne!(generate_file_name("a.png"), generate_file_name("a.png"));
    }

    #[test]
    fn test_upload_token_layout() {
        let token = sign_upload_token("ak", "sk", "chat-bucket:avatars/", 1_700_000_000).unwrap();
        let parts: Vec<&str> = token.split(':').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ak");

        let policy_json = general_purpose::URL_SAFE.decode(parts[2]).unwrap();
        let policy: serde_json::Value = serde_json::from_slice(&policy_json).unwrap();
        assert_eq!(policy["scope"], "chat-bucket:avatars/");
        assert_eq!(policy["deadline"], 1_700_000_000);
        assert_eq!(policy["isPrefixalScope"], 1);
    }

    #[test]
    fn test_upload_token_known_answer() {
        let token = sign_upload_token("access-key", "secret-key", "chat-bucket:avatars/", 1_700_000_000).unwrap();

        assert_eq!(
            token,
            "access-key:r5gxV5pAE8bE6OycscQB-uczP6w=:\
             eyJzY29wZSI6ImNoYXQtYnVja2V0OmF2YXRhcnMvIiwiZGVhZGxpbmUiOjE3MDAwMDAwMDAsImlzUHJlZml4YWxTY29wZSI6MX0="
        );

        let other = sign_upload_token("access-key", "other-key", "chat-bucket:avatars/", 1_700_000_000).unwrap();
        assert_ne!(other, token);
    }
}

//! 이메일 인증 코드 서비스
//!
//! 인증 코드를 생성하여 Redis에 저장(해시, TTL)하고 메일로 발송하며,
//! 사용자가 제출한 코드를 검증합니다. 검증에 성공한 코드는 즉시 삭제되므로
//! 같은 코드를 두 번 사용할 수 없습니다.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use crate::config::{MailConfig, VerificationConfig};
use crate::core::errors::{AppError, ErrorCode};
use crate::core::registry::{Service, ServiceLocator, ServiceRegistration};
use crate::domain::models::verification::CodePurpose;
use crate::repositories::verification::verification_repo::{CodeStore, VerificationRepository};
use super::email_client::EmailClient;

/// 용도별 메일 본문
#[derive(Debug, Clone, PartialEq)]
pub struct MailContent {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub struct MailService {
    email_client: EmailClient,
    verification_repo: Arc<VerificationRepository>,
}

static MAIL_SERVICE_INSTANCE: OnceCell<Arc<MailService>> = OnceCell::new();

impl MailService {
    /// # Panics
    ///
    /// HTTP 클라이언트를 생성할 수 없으면 기동 단계에서 패닉합니다.
    pub fn instance() -> Arc<Self> {
        MAIL_SERVICE_INSTANCE
            .get_or_init(|| {
                let email_client = EmailClient::new(
                    MailConfig::api_base_url(),
                    MailConfig::sender(),
                    MailConfig::auth_token(),
                    MailConfig::timeout(),
                )
                .expect("Failed to build mail API client");

                Arc::new(Self {
                    email_client,
                    verification_repo: ServiceLocator::get::<VerificationRepository>(),
                })
            })
            .clone()
    }

    /// 인증 코드를 생성, 저장하고 메일로 발송합니다.
    ///
    /// # Errors
    ///
    /// * `ErrorCode::EmailCodeNotExpired` (1009) - 이전 코드가 아직 유효함
    /// * `ErrorCode::SendEmailFailed` (1007) - 메일 발송 실패 (저장된 코드는 제거됨)
    pub async fn send_code(&self, email: &str, purpose: CodePurpose) -> Result<(), AppError> {
        let code = generate_code(VerificationConfig::code_length());
        let key = verification_key(email, purpose);
        let content = compose_mail(purpose, &code);

        let delivery = self.email_client
            .send_email(email, &content.subject, &content.html, &content.text);

        store_then_deliver(
            self.verification_repo.as_ref(),
            &key,
            &code,
            VerificationConfig::code_ttl_seconds(),
            delivery,
        )
        .await?;

        log::info!("📧 {} 인증 코드 발송: {}", purpose, email);
        Ok(())
    }

    /// 제출된 코드를 검증하고, 성공 시 저장된 코드를 제거합니다.
    ///
    /// # Errors
    ///
    /// * `ErrorCode::EmailCodeIncorrect` (1008) - 코드가 없거나 만료되었거나 일치하지 않음
    pub async fn check_code(&self, email: &str, code: &str, purpose: CodePurpose) -> Result<(), AppError> {
        redeem_code(self.verification_repo.as_ref(), &verification_key(email, purpose), code).await
    }

    /// 코드를 제거하지 않고 검증만 합니다. 이후 작업이 성공하면 `consume_code`로 제거합니다.
    pub async fn verify_code(&self, email: &str, code: &str, purpose: CodePurpose) -> Result<(), AppError> {
        verify_stored_code(self.verification_repo.as_ref(), &verification_key(email, purpose), code).await
    }

    pub async fn consume_code(&self, email: &str, purpose: CodePurpose) -> Result<(), AppError> {
        self.verification_repo.remove_code(&verification_key(email, purpose)).await
    }
}

/// 코드 해시를 저장한 뒤 `delivery`를 실행합니다.
///
/// 발송에 실패하면 저장한 코드를 제거하여 즉시 재요청할 수 있게 합니다.
pub async fn store_then_deliver<S, F, E>(
    store: &S,
    key: &str,
    code: &str,
    ttl_seconds: u64,
    delivery: F,
) -> Result<(), AppError>
where
    S: CodeStore + ?Sized,
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    store.save_code(key, &hash_code(code), ttl_seconds).await?;

    if let Err(e) = delivery.await {
        log::error!("❌ 인증 메일 발송 실패 ({}): {}", key, e);
        if let Err(e) = store.remove_code(key).await {
            log::warn!("⚠️ 발송 실패한 인증 코드 제거 실패 ({}): {}", key, e);
        }
        return Err(AppError::Business(ErrorCode::SendEmailFailed));
    }

    Ok(())
}

pub async fn verify_stored_code<S>(store: &S, key: &str, code: &str) -> Result<(), AppError>
where
    S: CodeStore + ?Sized,
{
    match store.find_code(key).await? {
        Some(stored) if digest_matches(&stored, code) => Ok(()),
        _ => {
            log::debug!("🚫 인증 코드 불일치: {}", key);
            Err(AppError::Business(ErrorCode::EmailCodeIncorrect))
        }
    }
}

/// 검증에 성공한 코드는 제거되어 다시 사용할 수 없습니다.
pub async fn redeem_code<S>(store: &S, key: &str, code: &str) -> Result<(), AppError>
where
    S: CodeStore + ?Sized,
{
    verify_stored_code(store, key, code).await?;
    store.remove_code(key).await
}

fn digest_matches(stored: &str, code: &str) -> bool {
    stored.as_bytes().ct_eq(hash_code(code.trim()).as_bytes()).into()
}

#[async_trait]
impl Service for MailService {
    fn name(&self) -> &str {
        "mail_service"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

fn construct_mail_service() -> Box<dyn Any + Send + Sync> {
    Box::new(MailService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "mail_service",
        constructor: construct_mail_service,
    }
}

/// 각 자리가 0-9에서 균등하게 선택된 숫자 코드
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// `{email}-code-{purpose}`
pub fn verification_key(email: &str, purpose: CodePurpose) -> String {
    format!("{}-code-{}", email, purpose)
}

fn hash_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.as_bytes()))
}

pub fn compose_mail(purpose: CodePurpose, code: &str) -> MailContent {
    let (subject, heading) = match purpose {
        CodePurpose::Register => ("Registration verification code", "Registration code"),
        CodePurpose::Login => ("Login verification code", "Login code"),
    };
    let minutes = VerificationConfig::code_ttl_seconds() / 60;

    MailContent {
        subject: subject.to_string(),
        html: format!(
            "<h1>{}: {}</h1><p>The code expires in {} minutes.</p>",
            heading, code, minutes
        ),
        text: format!("{}: {}\nThe code expires in {} minutes.", heading, code, minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::ready;
    use std::sync::Mutex;

    /// TTL은 무시하고 키가 있으면 유효한 것으로 보는 메모리 저장소
    #[derive(Default)]
    struct MemoryCodeStore {
        codes: Mutex<HashMap<String, String>>,
    }

    impl MemoryCodeStore {
        fn with_code(key: &str, code: &str) -> Self {
            let store = Self::default();
            store.codes.lock().unwrap().insert(key.to_string(), hash_code(code));
            store
        }

        fn stored(&self, key: &str) -> Option<String> {
            self.codes.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl CodeStore for MemoryCodeStore {
        async fn save_code(&self, key: &str, code_digest: &str, _ttl_seconds: u64) -> Result<(), AppError> {
            let mut codes = self.codes.lock().unwrap();
            if codes.contains_key(key) {
                return Err(AppError::Business(ErrorCode::EmailCodeNotExpired));
            }
            codes.insert(key.to_string(), code_digest.to_string());
            Ok(())
        }

        async fn find_code(&self, key: &str) -> Result<Option<String>, AppError> {
            Ok(self.stored(key))
        }

        async fn remove_code(&self, key: &str) -> Result<(), AppError> {
            self.codes.lock().unwrap().remove(key);
            Ok(())
        }
    }

    const KEY: &str = "alan@example.com-code-register";

    #[actix_web::test]
    async fn test_delivered_code_is_stored_as_digest() {
        let store = MemoryCodeStore::default();

        store_then_deliver(&store, KEY, "042137", 300, ready(Ok::<(), String>(())))
            .await
            .unwrap();

        assert_eq!(store.stored(KEY), Some(hash_code("042137")));
    }

    #[actix_web::test]
    async fn test_live_code_blocks_new_code() {
        let store = MemoryCodeStore::with_code(KEY, "111111");

        let result = store_then_deliver(&store, KEY, "222222", 300, ready(Ok::<(), String>(()))).await;

        assert!(matches!(result, Err(AppError::Business(ErrorCode::EmailCodeNotExpired))));
        assert_eq!(store.stored(KEY), Some(hash_code("111111")));
    }

    #[actix_web::test]
    async fn test_failed_delivery_removes_code() {
        let store = MemoryCodeStore::default();

        let result = store_then_deliver(&store, KEY, "042137", 300, ready(Err("mail api down"))).await;

        assert!(matches!(result, Err(AppError::Business(ErrorCode::SendEmailFailed))));
        assert!(store.stored(KEY).is_none());

        store_then_deliver(&store, KEY, "042137", 300, ready(Ok::<(), String>(())))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_redeemed_code_cannot_be_reused() {
        let store = MemoryCodeStore::with_code(KEY, "042137");

        redeem_code(&store, KEY, " 042137 ").await.unwrap();
        assert!(store.stored(KEY).is_none());

        let second = redeem_code(&store, KEY, "042137").await;
        assert!(matches!(second, Err(AppError::Business(ErrorCode::EmailCodeIncorrect))));
    }

    #[actix_web::test]
    async fn test_missing_or_wrong_code_is_incorrect() {
        let empty = MemoryCodeStore::default();
        assert!(matches!(
            redeem_code(&empty, KEY, "042137").await,
            Err(AppError::Business(ErrorCode::EmailCodeIncorrect))
        ));

        let store = MemoryCodeStore::with_code(KEY, "042137");
        assert!(matches!(
            redeem_code(&store, KEY, "999999").await,
            Err(AppError::Business(ErrorCode::EmailCodeIncorrect))
        ));
        assert!(store.stored(KEY).is_some());
    }

    #[actix_web::test]
    async fn test_verify_keeps_code_for_retry() {
        let store = MemoryCodeStore::with_code(KEY, "042137");

        verify_stored_code(&store, KEY, "042137").await.unwrap();
        verify_stored_code(&store, KEY, "042137").await.unwrap();
        assert_eq!(store.stored(KEY), Some(hash_code("042137")));
    }

    #[test]
    fn test_digest_matches_only_same_code() {
        let stored = hash_code("042137");
        assert!(digest_matches(&stored, "042137"));
        assert!(!digest_matches(&stored, "042138"));
        assert!(!digest_matches("short", "042137"));
    }

    #[test]
    fn test_generate_code_is_numeric_with_requested_length() {
        for length in [4, 6, 8] {
            let code = generate_code(length);
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_code_uses_every_digit() {
        let mut seen = [false; 10];
        for _ in 0..200 {
            for c in generate_code(6).chars() {
                seen[c.to_digit(10).unwrap() as usize] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_verification_key_format() {
        assert_eq!(
            verification_key("alan@example.com", CodePurpose::Register),
            "alan@example.com-code-register"
        );
        assert_eq!(
            verification_key("alan@example.com", CodePurpose::Login),
            "alan@example.com-code-login"
        );
    }

    #[test]
    fn test_hash_code_is_sha256_hex() {
        let digest = hash_code("123456");
        assert_eq!(digest.len(), 64);
        assert_ne!(digest, "123456");
        assert_eq!(digest, hash_code("123456"));
    }

    #[test]
    fn test_compose_mail_differs_by_purpose() {
        let register = compose_mail(CodePurpose::Register, "042137");
        let login = compose_mail(CodePurpose::Login, "042137");

        assert_ne!(register.subject, login.subject);
        assert!(register.html.contains("042137"));
        assert!(login.text.contains("042137"));
    }
}

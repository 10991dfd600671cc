//! RSA 비밀번호 전송 서비스
//!
//! 클라이언트는 `GET /v1/user/public_key`로 받은 공개키로 비밀번호를 암호화하고
//! (PKCS#1 v1.5), base64로 인코딩하여 전송합니다. 서버는 이 서비스로 복호화한 뒤
//! 해싱 또는 검증을 수행합니다.
//!
//! # 설정
//!
//! - `RSA_PRIVATE_KEY_PATH`: 개인키 파일 경로 (PKCS#1 PEM)
//! - `RSA_PUBLIC_KEY_PATH`: 공개키 파일 경로 (SPKI PEM)
//! - `RSA_KEY_BITS`: 자동 생성 시 키 길이 (기본값 2048)
//!
//! 키 파일이 없으면 최초 기동 시 새 키 쌍을 생성하여 저장합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let cipher = CipherService::instance();
//! let password = cipher.decrypt(&req.password)?;
//! ```

use std::any::Any;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use once_cell::sync::OnceCell;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use crate::config::RsaConfig;
use crate::core::errors::AppError;
use crate::core::registry::{Service, ServiceRegistration};

pub struct CipherService {
    private_key: RsaPrivateKey,
    public_key_pem: String,
}

static CIPHER_SERVICE_INSTANCE: OnceCell<Arc<CipherService>> = OnceCell::new();

impl CipherService {
    /// 싱글톤 인스턴스를 반환합니다.
    ///
    /// # Panics
    ///
    /// 키 파일을 읽거나 생성할 수 없으면 기동 단계에서 패닉합니다.
    pub fn instance() -> Arc<Self> {
        CIPHER_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::load().expect("Failed to initialize CipherService"))
            })
            .clone()
    }

    fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let private_key_path = RsaConfig::private_key_path();
        let public_key_path = RsaConfig::public_key_path();

        if !Path::new(&private_key_path).exists() || !Path::new(&public_key_path).exists() {
            log::info!("🔑 Transport keys not found. Generating new RSA key pair...");
            Self::generate_keys(&private_key_path, &public_key_path, RsaConfig::key_bits())?;
            log::info!("✅ Transport RSA keys generated successfully");
        } else {
            log::info!("🔑 Loading existing transport RSA keys");
        }

        let private_key_pem = fs::read_to_string(&private_key_path)
            .map_err(|e| format!("Failed to read private key file '{}': {}", private_key_path, e))?;
        let public_key_pem = fs::read_to_string(&public_key_path)
            .map_err(|e| format!("Failed to read public key file '{}': {}", public_key_path, e))?;

        let private_key = RsaPrivateKey::from_pkcs1_pem(&private_key_pem)?;
        let public_key = RsaPublicKey::from_public_key_pem(&public_key_pem)?;

        if public_key != private_key.to_public_key() {
            return Err("Transport public key does not match the private key".into());
        }

        Ok(Self {
            private_key,
            public_key_pem,
        })
    }

    /// 이미 로드된 개인키로 서비스를 구성합니다.
    pub fn from_private_key(private_key: RsaPrivateKey) -> Result<Self, AppError> {
        let public_key_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| AppError::InternalError(format!("공개키 인코딩 실패: {}", e)))?;

        Ok(Self {
            private_key,
            public_key_pem,
        })
    }

    fn generate_keys(private_key_path: &str, public_key_path: &str, bits: usize) -> Result<(), Box<dyn std::error::Error>> {
        for path in [private_key_path, public_key_path] {
            if let Some(parent) = Path::new(path).parent() {
                fs::create_dir_all(parent)?;
            }
        }

        let private_key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, bits)?;
        let public_key = private_key.to_public_key();

        // 개인키: PKCS#1, 공개키: SPKI(PKCS#8)
        let private_key_pem = private_key.to_pkcs1_pem(LineEnding::LF)?;
        fs::write(private_key_path, private_key_pem.as_bytes())?;

        let public_key_pem = public_key.to_public_key_pem(LineEnding::LF)?;
        fs::write(public_key_path, public_key_pem.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(private_key_path, fs::Permissions::from_mode(0o600))?;
            fs::set_permissions(public_key_path, fs::Permissions::from_mode(0o644))?;
        }

        log::info!("📁 Private key saved: {}", private_key_path);
        log::info!("📁 Public key saved: {}", public_key_path);

        Ok(())
    }

    /// base64 인코딩된 RSA 암호문을 평문 문자열로 복호화합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - base64 형식 오류, 복호화 실패, UTF-8이 아닌 평문
    pub fn decrypt(&self, ciphertext_b64: &str) -> Result<String, AppError> {
        let ciphertext = general_purpose::STANDARD
            .decode(ciphertext_b64.trim())
            .map_err(|_| AppError::ValidationError("암호문이 올바른 base64 형식이 아닙니다".to_string()))?;

        let plaintext = self.private_key
            .decrypt(Pkcs1v15Encrypt, &ciphertext)
            .map_err(|_| AppError::ValidationError("암호문을 복호화할 수 없습니다".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|_| AppError::ValidationError("복호화된 값이 UTF-8 문자열이 아닙니다".to_string()))
    }

    /// 클라이언트 배포용 공개키 (SPKI PEM)
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }
}

#[async_trait]
impl Service for CipherService {
    fn name(&self) -> &str {
        "cipher_service"
    }

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

fn construct_cipher_service() -> Box<dyn Any + Send + Sync> {
    Box::new(CipherService::instance())
}

inventory::submit! {
    ServiceRegistration {
        name: "cipher_service",
        constructor: construct_cipher_service,
    }
}

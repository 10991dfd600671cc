//! # Authentication Configuration Module
//!
//! JWT 토큰, RSA 비밀번호 전송 키, 이메일 인증 코드 등 인증 관련 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_DAYS="90"
//! ```
//!
//! ### RSA 비밀번호 전송 키
//! ```bash
//! export RSA_PRIVATE_KEY_PATH="./secrets/transport_private_key.pem"
//! export RSA_PUBLIC_KEY_PATH="./secrets/transport_public_key.pem"
//! export RSA_KEY_BITS="2048"
//! ```
//!
//! 키 파일이 없으면 서버 기동 시 새 키 쌍을 생성하여 위 경로에 저장합니다.
//!
//! ### 이메일 인증 코드
//! ```bash
//! export VERIFICATION_CODE_LENGTH="6"
//! export VERIFICATION_CODE_TTL_SECONDS="300"
//! ```

use std::env;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 토큰 유효 기간(일). 기본값 90일
    pub fn expiration_days() -> i64 {
        env::var("JWT_EXPIRATION_DAYS")
            .ok()
            .and_then(|days| days.parse().ok())
            .filter(|days| *days > 0)
            .unwrap_or(90)
    }
}

/// 클라이언트가 비밀번호를 암호화할 때 사용하는 RSA 키 쌍 설정
pub struct RsaConfig;

impl RsaConfig {
    pub fn private_key_path() -> String {
        env::var("RSA_PRIVATE_KEY_PATH")
            .unwrap_or_else(|_| "./secrets/transport_private_key.pem".to_string())
    }

    pub fn public_key_path() -> String {
        env::var("RSA_PUBLIC_KEY_PATH")
            .unwrap_or_else(|_| "./secrets/transport_public_key.pem".to_string())
    }

    /// 새로 생성할 키 길이. 2048 미만 값은 무시합니다.
    pub fn key_bits() -> usize {
        env::var("RSA_KEY_BITS")
            .ok()
            .and_then(|bits| bits.parse().ok())
            .filter(|bits| *bits >= 2048)
            .unwrap_or(2048)
    }
}

pub struct VerificationConfig;

impl VerificationConfig {
    pub fn code_length() -> usize {
        env::var("VERIFICATION_CODE_LENGTH")
            .ok()
            .and_then(|len| len.parse().ok())
            .filter(|len| (4..=10).contains(len))
            .unwrap_or(6)
    }

    /// 인증 코드 유효 시간(초). 기본값 5분
    pub fn code_ttl_seconds() -> u64 {
        env::var("VERIFICATION_CODE_TTL_SECONDS")
            .ok()
            .and_then(|ttl| ttl.parse().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults() {
        if env::var("JWT_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::expiration_days(), 90);
        }
        if env::var("JWT_SECRET").is_err() {
            assert_eq!(JwtConfig::secret(), "your-secret-key");
        }
    }

    #[test]
    fn test_rsa_defaults() {
        if env::var("RSA_KEY_BITS").is_err() {
            assert_eq!(RsaConfig::key_bits(), 2048);
        }
        if env::var("RSA_PRIVATE_KEY_PATH").is_err() {
            assert!(RsaConfig::private_key_path().ends_with(".pem"));
        }
    }

    #[test]
    fn test_verification_defaults() {
        if env::var("VERIFICATION_CODE_LENGTH").is_err() {
            assert_eq!(VerificationConfig::code_length(), 6);
        }
        if env::var("VERIFICATION_CODE_TTL_SECONDS").is_err() {
            assert_eq!(VerificationConfig::code_ttl_seconds(), 300);
        }
    }
}

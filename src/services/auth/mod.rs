//! 인증/보안 서비스
//!
//! - `TokenService`: HS256 JWT 발급 및 검증
//! - `CipherService`: RSA 비밀번호 전송 (공개키 배포, 복호화)

pub mod token_service;
pub mod cipher_service;

pub use token_service::TokenService;
pub use cipher_service::CipherService;

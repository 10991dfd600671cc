//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로 또는 `OnceCell` + `inventory` 등록으로 싱글톤 관리되며,
//! `ServiceLocator`를 통해 서로 주입됩니다.
//!
//! # Features
//!
//! - 이메일 인증 기반 회원가입과 로그인
//! - HS256 JWT 발급/검증
//! - RSA 비밀번호 전송
//! - 오브젝트 스토리지 파일 업로드
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, auth::TokenService};
//!
//! let user_service = UserService::instance();
//! let token_service = TokenService::instance();
//! ```

pub mod users;
pub mod auth;
pub mod mail;
pub mod storage;

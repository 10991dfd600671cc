//! 채팅 사용자 서비스 백엔드
//!
//! 이메일 인증 기반 회원가입, 비밀번호/이메일 코드 로그인, 프로필 관리,
//! 파일 업로드를 제공하는 사용자 서비스입니다.
//!
//! # Features
//!
//! - **회원가입**: 이메일 인증 코드(Redis, TTL) 확인 후 계정 생성
//! - **로그인**: RSA 암호화 비밀번호 또는 이메일 코드, HS256 JWT 발급
//! - **프로필**: 사용자 정보/프로필 조회 및 수정
//! - **업로드**: Qiniu 오브젝트 스토리지 폼 업로드
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /v1/user, /v1/upload
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, ApiResponse 봉투
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← User / Mail / Cipher / Token / Upload
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← User / Verification
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use chat_user_service::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let response = user_service.login(request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;

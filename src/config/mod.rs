//! # Configuration Module
//!
//! 환경 변수 기반 설정을 정적 구조체로 제공합니다.
//! 모든 값은 호출 시점에 환경 변수에서 읽으며, 설정이 없으면 개발용 기본값을 사용합니다.
//!
//! - [`data_config`]: 실행 환경, 저장소 연결, 서버 바인딩, Rate Limiting
//! - [`auth_config`]: JWT, RSA 비밀번호 전송 키, 이메일 인증 코드
//! - [`integration_config`]: 메일 API, Qiniu 오브젝트 스토리지
//!
//! `.env.dev` / `.env.prod` 파일은 `main.rs`에서 `PROFILE` 값에 따라 로드됩니다.

pub mod data_config;
pub mod auth_config;
pub mod integration_config;

pub use data_config::*;
pub use auth_config::*;
pub use integration_config::*;

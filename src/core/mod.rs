//! # Core Framework Module
//!
//! 백엔드 서비스의 핵심 프레임워크 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 전역 싱글톤 컨테이너
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//! - **의존성 해결**: `Arc<T>` 필드 타입 기반 자동 주입
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **ErrorCode**: 클라이언트에 노출되는 비즈니스 에러 코드 테이블
//! - **HTTP 통합**: `ResponseError` 구현으로 공통 응답 봉투 자동 생성
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! #[repository(name = "user", collection = "user_basics")]
//! pub struct UserRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! #[service(name = "user")]
//! pub struct UserService {
//!     user_repo: Arc<UserRepository>,   // 자동 주입
//!     mail_service: Arc<MailService>,   // 자동 주입
//! }
//!
//! let user_service = UserService::instance();
//! ```
//!
//! ### 애플리케이션 초기화
//!
//! ```rust,ignore
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//! ServiceLocator::initialize_all().await?;
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;

//! # Repository Layer
//!
//! 데이터 액세스 계층입니다. 모든 리포지토리는 `#[repository]` 매크로로
//! 싱글톤 등록되며, `Arc<Database>` / `Arc<RedisClient>` 필드는
//! `ServiceLocator`에서 자동으로 주입됩니다.
//!
//! | 리포지토리 | 저장소 | 용도 |
//! |------------|--------|------|
//! | `UserRepository` | MongoDB `user_basics` + Redis 캐시 | 사용자 CRUD |
//! | `VerificationRepository` | Redis | 이메일 인증 코드 (TTL) |
//!
//! ```rust,ignore
//! let repo = UserRepository::instance();
//! let user = repo.find_by_email("alan@example.com").await?;
//! ```

pub mod users;
pub mod verification;

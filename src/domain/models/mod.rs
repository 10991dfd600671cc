//! # Domain Models Module
//!
//! 데이터베이스에 저장되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ## Entities vs Models
//!
//! - `entities/`: MongoDB 문서로 영속화되는 객체 (`User`)
//! - `models/`: 요청 처리 중에만 존재하는 값 (토큰 클레임, 인증 사용자, 코드 용도)
//!
//! ```text
//! models/
//! ├── auth/           # AuthenticatedUser 추출자, AuthMode
//! ├── token/          # TokenClaims (JWT payload)
//! └── verification/   # CodePurpose (register / login)
//! ```

pub mod auth;
pub mod token;
pub mod verification;

pub use auth::*;
pub use token::*;
pub use verification::*;

//! 인증 관련 모델

pub mod auth_mode;
pub mod authenticated_user;

pub use auth_mode::AuthMode;
pub use authenticated_user::{AuthenticatedUser, OptionalUser};

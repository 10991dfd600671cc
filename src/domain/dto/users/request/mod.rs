//! 사용자 API 요청 DTO

pub mod register;
pub mod login;
pub mod profile;

pub use register::{CheckRegisterEmailCodeRequest, RegisterRequest};
pub use login::{EmailLoginCheckRequest, EmailLoginRequest, LoginRequest};
pub use profile::{UpdateProfileRequest, UpdateUserInfoRequest};

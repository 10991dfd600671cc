//! # User Data Transfer Objects Module
//!
//! 사용자 API의 요청/응답 구조체입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── register.rs    # RegisterRequest, CheckRegisterEmailCodeRequest
//! │   ├── login.rs       # LoginRequest, EmailLoginRequest, EmailLoginCheckRequest
//! │   └── profile.rs     # UpdateUserInfoRequest, UpdateProfileRequest
//! └── response/
//!     └── user_response.rs  # UserResponse, LoginResponseData, GetProfileResponseData
//! ```
//!
//! 응답 DTO는 항상 `ApiResponse`의 `data` 필드에 담겨 전달됩니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

//! HTTP 요청 핸들러
//!
//! - `users`: 회원가입, 로그인, 사용자 정보/프로필, RSA 공개키
//! - `upload`: 파일 업로드
//! - `system`: 인덱스, 헬스 체크

pub mod users;
pub mod upload;
pub mod system;

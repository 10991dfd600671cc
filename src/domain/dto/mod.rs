//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조체를 정의합니다.
//! 요청 DTO는 `validator`로 입력을 검증하고, 응답 DTO는 엔티티에서
//! 민감한 정보(비밀번호 해시 등)를 제외한 공개 표현을 제공합니다.
//!
//! ```text
//! dto/
//! ├── common/            # 공통 응답 봉투 (ApiResponse)
//! └── users/
//!     ├── request/       # 회원가입, 로그인, 프로필 요청
//!     └── response/      # 사용자 공개 정보, 로그인 결과
//! ```
//!
//! JSON 필드 이름은 클라이언트 계약을 그대로 따르므로
//! `rePassword`, `userName`, `clientIp` 같은 camelCase 키가 섞여 있습니다.

pub mod common;
pub mod users;

pub use common::*;
pub use users::*;

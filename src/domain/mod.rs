//! # Domain Layer Module
//!
//! 도메인 계층은 저장 형식(entities), API 계약(dto), 요청 처리 중 사용하는
//! 값 객체(models)로 나뉩니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - MongoDB 문서 (User)
//! ├── dto        - 요청/응답 구조체와 ApiResponse 봉투
//! └── models     - TokenClaims, AuthenticatedUser, CodePurpose
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis
//! ```
//!
//! ## 변환 흐름
//!
//! ```text
//! RegisterRequest ──(서비스)──▶ User ──(From)──▶ UserResponse
//! ```
//!
//! 엔티티는 `password_hash`를 포함하므로 절대 그대로 응답하지 않고
//! `UserResponse`로 변환한 뒤 반환합니다.

pub mod entities;
pub mod dto;
pub mod models;

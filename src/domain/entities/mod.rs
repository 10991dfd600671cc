//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 엔티티를 정의합니다.
//!
//! - **ObjectId 지원**: `_id` 필드 매핑
//! - **캐시 호환**: 엔티티는 JSON으로도 손실 없이 직렬화되어 Redis 캐시에 저장됩니다
//! - **소프트 삭제**: `deleted_at`이 설정된 문서는 조회 대상에서 제외됩니다

pub mod users;

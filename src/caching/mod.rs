//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시와 단기 데이터 저장을 제공합니다.
//!
//! # 용도
//!
//! - 사용자 조회 캐시 (`user:email:{email}`, 리포지토리 캐시 키)
//! - 이메일 인증 코드 (`{email}-code-{purpose}`, TTL 5분)
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;

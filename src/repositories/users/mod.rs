//! 사용자 리포지토리 (`user_basics` 컬렉션)

pub mod user_repo;

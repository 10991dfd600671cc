//! Users Entity Module
//!
//! 채팅 사용자 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! let user = User::new(name, email, password_hash);
//! let created = user_repo.create(user).await?;
//! ```

pub mod user;

//! # 사용자 리포지토리 구현
//!
//! `user_basics` 컬렉션의 데이터 액세스 계층입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 조회 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **소프트 삭제**: `deleted_at`이 설정된 문서는 모든 조회에서 제외
//! - **고유성**: `name`, `email` 유니크 인덱스 + 서비스 계층 사전 확인
//! - **캐시 무효화**: 수정 시 ID 캐시와 이메일 캐시를 함께 제거

use std::sync::Arc;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    core::errors::{AppError, ErrorCode},
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;

/// 사용자 캐시 TTL (10분)
const USER_CACHE_TTL_SECONDS: usize = 600;

/// 삭제되지 않은 문서만 대상으로 하는 필터를 만듭니다.
fn active(mut filter: Document) -> Document {
    filter.insert("deleted_at", mongodb::bson::Bson::Null);
    filter
}

fn email_cache_key(email: &str) -> String {
    format!("user:email:{}", email)
}

/// 유니크 인덱스 위반(E11000)을 비즈니스 에러 코드로 변환합니다.
///
/// 사전 중복 확인과 삽입 사이의 경쟁 상태에서만 발생합니다.
fn duplicate_key_code(error: &mongodb::error::Error) -> Option<ErrorCode> {
    let (code, message) = match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => (write_error.code, write_error.message.as_str()),
        ErrorKind::Command(command_error) => (command_error.code, command_error.message.as_str()),
        _ => return None,
    };

    if code != 11000 {
        return None;
    }

    if message.contains("email_unique") {
        Some(ErrorCode::EmailAlreadyUse)
    } else {
        Some(ErrorCode::UserNameAlreadyUse)
    }
}

/// 사용자 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// - **TTL**: 10분 (600초)
/// - **키 패턴**:
///   - 개별 사용자: `cache_key(id)`
///   - 이메일 조회: `user:email:{email}`
/// - 이름 조회는 로그인과 중복 확인에만 쓰이므로 캐싱하지 않습니다.
///
/// ## 인덱스
///
/// `name_unique`, `email_unique`, `created_at_desc`
#[repository(name = "user", collection = "user_basics")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 이메일 주소로 사용자 조회 (캐시 우선)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(active(doc! { "email": email }))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 이름으로 사용자 조회
    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(active(doc! { "name": name }))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자 조회 (캐시 우선)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 24자리 16진수 ObjectId가 아닌 경우
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(active(doc! { "_id": object_id }))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    pub async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        Ok(self.find_by_name(name).await?.is_some())
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// 새 사용자 생성
    ///
    /// # Errors
    ///
    /// * `ErrorCode::UserNameAlreadyUse` (1002) - 이름 중복
    /// * `ErrorCode::EmailAlreadyUse` (1001) - 이메일 중복
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.exists_by_name(&user.name).await? {
            return Err(AppError::Business(ErrorCode::UserNameAlreadyUse));
        }

        if self.exists_by_email(&user.email).await? {
            return Err(AppError::Business(ErrorCode::EmailAlreadyUse));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| match duplicate_key_code(&e) {
                Some(code) => AppError::Business(code),
                None => AppError::DatabaseError(e.to_string()),
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string())
        })?;
        user.id = Some(id);

        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 사용자 문서에 `$set` 업데이트를 적용하고 변경된 문서를 반환합니다.
    ///
    /// `updated_at`은 항상 현재 시각으로 갱신됩니다. 수정 전 이메일과
    /// 변경된 이메일의 캐시 키를 모두 제거합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - 사용자가 없거나 삭제된 경우
    pub async fn update_fields(&self, user: &User, mut fields: Document) -> Result<Option<User>, AppError> {
        let object_id = user.id
            .ok_or_else(|| AppError::ValidationError("저장되지 않은 사용자입니다".to_string()))?;

        fields.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<User>()
            .find_one_and_update(
                active(doc! { "_id": object_id }),
                doc! { "$set": fields },
            )
            .with_options(options)
            .await
            .map_err(|e| match duplicate_key_code(&e) {
                Some(code) => AppError::Business(code),
                None => AppError::DatabaseError(e.to_string()),
            })?;

        let _ = self.invalidate_cache(&object_id.to_hex()).await;

        let mut stale_keys = vec![email_cache_key(&user.email)];
        if let Some(ref updated) = updated {
            if updated.email != user.email {
                stale_keys.push(email_cache_key(&updated.email));
            }
        }
        let _ = self.redis.del_multiple(&stale_keys).await;

        Ok(updated)
    }

    /// 로그인 시각과 하트비트 시각을 기록하고 로그아웃 상태를 해제합니다.
    pub async fn record_login(&self, user: &User) -> Result<User, AppError> {
        let now = DateTime::now();

        self.update_fields(user, doc! {
            "login_time": now,
            "heart_beat_time": now,
            "is_login_out": false,
        })
        .await?
        .ok_or(AppError::Business(ErrorCode::UserNotFound))
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 시작 시 한 번 호출합니다. 이미 중복 데이터가 있으면
    /// 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        collection
            .create_indexes([name_index, email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_filter_excludes_soft_deleted() {
        let filter = active(doc! { "name": "alan" });
        assert_eq!(filter.get_str("name").unwrap(), "alan");
        assert_eq!(filter.get("deleted_at"), Some(&mongodb::bson::Bson::Null));
    }

    #[test]
    fn test_email_cache_key() {
        assert_eq!(email_cache_key("alan@example.com"), "user:email:alan@example.com");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::User;

/// 사용자 공개 정보 응답 DTO
///
/// 비밀번호 해시를 포함하지 않으며, 시각 필드는 RFC 3339 문자열로 직렬화됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub gender: String,
    pub phone: String,
    pub motto: String,
    pub identity: String,
    pub client_ip: String,
    pub client_port: String,
    pub device_info: String,
    pub login_time: Option<DateTime<Utc>>,
    pub heart_beat_time: Option<DateTime<Utc>>,
    pub login_out_time: Option<DateTime<Utc>>,
    pub is_login_out: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn to_utc(value: mongodb::bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            avatar,
            gender,
            phone,
            motto,
            identity,
            client_ip,
            client_port,
            device_info,
            login_time,
            heart_beat_time,
            login_out_time,
            is_login_out,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            avatar,
            gender,
            phone,
            motto,
            identity,
            client_ip,
            client_port,
            device_info,
            login_time: login_time.and_then(to_utc),
            heart_beat_time: heart_beat_time.and_then(to_utc),
            login_out_time: login_out_time.and_then(to_utc),
            is_login_out,
            created_at: to_utc(created_at),
            updated_at: to_utc(updated_at),
        }
    }
}

/// 로그인/회원가입 성공 응답 (`data` 필드)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: UserResponse,
}

impl LoginResponseData {
    pub fn new(token: String, user: User) -> Self {
        Self {
            token,
            user: UserResponse::from(user),
        }
    }
}

/// `GET /v1/user/profile` 응답 (`data` 필드)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProfileResponseData {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub nickname: String,
}

impl From<&User> for GetProfileResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id_string().unwrap_or_default(),
            nickname: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn stored_user() -> User {
        let mut user = User::new(
            "alan".to_string(),
            "alan@example.com".to_string(),
            "$2b$04$secret-hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = stored_user();
        let expected_id = user.id_string().unwrap();

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password"));
        assert!(json.contains(&expected_id));
    }

    #[test]
    fn test_login_response_shape() {
        let data = LoginResponseData::new("jwt".to_string(), stored_user());
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["token"], "jwt");
        assert_eq!(json["user"]["name"], "alan");
        assert!(json["user"]["created_at"].is_string());
    }

    #[test]
    fn test_profile_response_uses_name_as_nickname() {
        let user = stored_user();
        let json = serde_json::to_value(GetProfileResponseData::from(&user)).unwrap();

        assert_eq!(json["userId"], user.id_string().unwrap());
        assert_eq!(json["nickname"], "alan");
    }
}

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 채팅 사용자 기본 정보 (`user_basics` 컬렉션)
///
/// `name`과 `email`은 전체 사용자 중 고유해야 하며, `deleted_at`이 설정된
/// 문서는 모든 조회에서 제외됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub motto: String,
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub client_port: String,
    #[serde(default)]
    pub device_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_beat_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_out_time: Option<DateTime>,
    #[serde(default)]
    pub is_login_out: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
}

impl User {
    /// 이메일 인증을 마친 신규 사용자를 생성합니다.
    ///
    /// 로그인/하트비트/로그아웃 시각은 모두 생성 시각으로 초기화됩니다.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash,
            avatar: String::new(),
            gender: String::new(),
            phone: String::new(),
            motto: String::new(),
            identity: String::new(),
            client_ip: String::new(),
            client_port: String::new(),
            device_info: String::new(),
            login_time: Some(now),
            heart_beat_time: Some(now),
            login_out_time: Some(now),
            is_login_out: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

//! # 사용자 정보 수정 요청 DTO
//!
//! `email`을 제외한 필드는 JSON에서 생략할 수 있으며, 생략된 필드는 빈 문자열로
//! 역직렬화됩니다. 필수 여부는 서비스 계층에서 판단합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /v1/user/user_info_update` 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserInfoRequest {
    #[serde(rename = "userName", default)]
    pub user_name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub avatar: String,

    #[serde(default)]
    pub motto: String,

    #[serde(rename = "clientIp", default)]
    pub client_ip: String,

    #[serde(rename = "clientPort", default)]
    pub client_port: String,
}

/// `PUT /v1/user/profile` 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub nickname: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_info_request_field_names() {
        let json = r#"{
            "userName": "alan",
            "email": "alan@example.com",
            "phone": "13800000000",
            "avatar": "https://cdn.example.com/a.png",
            "clientIp": "10.0.0.1",
            "clientPort": "8080"
        }"#;
        let request: UpdateUserInfoRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.user_name, "alan");
        assert_eq!(request.client_ip, "10.0.0.1");
        assert_eq!(request.client_port, "8080");
        assert!(request.motto.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_profile_requires_valid_email() {
        let request = UpdateProfileRequest {
            nickname: "alan".to_string(),
            email: "alan".to_string(),
        };
        assert!(request.validate().is_err());
    }
}

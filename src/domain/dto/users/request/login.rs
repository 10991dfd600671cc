//! 로그인 요청 DTO (비밀번호 로그인, 이메일 코드 로그인)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 이름 + RSA 암호화 비밀번호 로그인
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub password: String,
}

/// 이메일 로그인 코드 발송 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailLoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

/// 이메일 로그인 코드 확인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailLoginCheckRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "인증 코드는 필수입니다"))]
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        let request: LoginRequest = serde_json::from_str(r#"{"name":"alan"}"#).unwrap();
        assert_eq!(request.name, "alan");
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_email_login_check_validation() {
        let valid = EmailLoginCheckRequest {
            email: "alan@example.com".to_string(),
            code: "042137".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_code = EmailLoginCheckRequest {
            email: "alan@example.com".to_string(),
            code: String::new(),
        };
        assert!(missing_code.validate().is_err());
    }
}

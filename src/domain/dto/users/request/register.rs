//! # 회원가입 요청 DTO
//!
//! 회원가입은 두 단계로 진행됩니다.
//!
//! 1. `RegisterRequest`: 이름/이메일 중복을 확인하고 인증 코드를 발송
//! 2. `CheckRegisterEmailCodeRequest`: 인증 코드를 확인하고 계정을 생성
//!
//! 비밀번호 필드는 모두 서버 RSA 공개키로 암호화된 base64 문자열입니다.
//! PKCS#1 v1.5 패딩은 매번 다른 암호문을 만들기 때문에 `password`와
//! `rePassword`의 일치 여부는 복호화 이후 서비스 계층에서 확인합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 회원가입 인증 코드 발송 요청
///
/// ```json
/// {
///   "name": "alan",
///   "email": "alan@example.com",
///   "password": "<base64 RSA ciphertext>",
///   "rePassword": "<base64 RSA ciphertext>"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "이름은 필수입니다"))]
    pub name: String,

    #[validate(length(min = 1, message = "이메일은 필수입니다"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,

    #[serde(rename = "rePassword")]
    #[validate(length(min = 1, message = "비밀번호 확인은 필수입니다"))]
    pub re_password: String,
}

/// 회원가입 인증 코드 확인 및 계정 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckRegisterEmailCodeRequest {
    #[validate(length(min = 1, message = "이름은 필수입니다"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호는 필수입니다"))]
    pub password: String,

    #[validate(length(min = 1, message = "인증 코드는 필수입니다"))]
    pub code: String,
}

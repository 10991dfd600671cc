//! # 사용자 관리 서비스 구현
//!
//! 회원가입(이메일 인증), 로그인(비밀번호/이메일 코드), 사용자 정보 수정,
//! 프로필 조회/수정을 담당하는 비즈니스 로직입니다.
//!
//! ## 회원가입 흐름
//!
//! ```text
//! POST /register                    POST /register_email_code_check
//!   │ RSA 복호화, 비밀번호 일치 확인     │ RSA 복호화 → 인증 코드 확인 (1008)
//!   │ 이름 중복 (1002)                 │ bcrypt 해싱 → 사용자 생성
//!   │ 이메일 중복 (1001)               │ 인증 코드 제거
//!   └ 인증 코드 발송 (1007/1009)        └ JWT 발급 → { token, user }
//! ```
//!
//! ## 보안 설계
//!
//! - **전송 구간**: 비밀번호는 항상 RSA 암호문으로 수신하며 평문은 메모리에서만 사용
//! - **저장**: bcrypt 해시만 저장 (cost는 `PasswordConfig::bcrypt_cost()`)
//! - **응답**: 엔티티는 `UserResponse`로 변환되어 비밀번호 해시가 제외됨

use std::sync::Arc;
use mongodb::bson::{doc, Document};
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    core::errors::{AppError, ErrorCode},
    domain::{
        dto::users::{
            request::{
                CheckRegisterEmailCodeRequest, LoginRequest, RegisterRequest,
                UpdateProfileRequest, UpdateUserInfoRequest,
            },
            response::{GetProfileResponseData, LoginResponseData},
        },
        entities::users::user::User,
        models::verification::CodePurpose,
    },
    repositories::users::user_repo::UserRepository,
    services::{
        auth::{CipherService, TokenService},
        mail::MailService,
    },
};

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    mail_service: Arc<MailService>,
    cipher_service: Arc<CipherService>,
    token_service: Arc<TokenService>,
}

impl UserService {
    /// 회원가입 1단계: 중복 확인 후 회원가입 인증 코드를 발송합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 복호화 실패, 두 비밀번호 불일치
    /// * `ErrorCode::UserNameAlreadyUse` (1002)
    /// * `ErrorCode::EmailAlreadyUse` (1001)
    /// * `ErrorCode::EmailCodeNotExpired` (1009), `ErrorCode::SendEmailFailed` (1007)
    pub async fn register(&self, request: RegisterRequest) -> Result<(), AppError> {
        let password = self.cipher_service.decrypt(&request.password)?;
        let re_password = self.cipher_service.decrypt(&request.re_password)?;
        ensure_passwords_match(&password, &re_password)?;

        if self.user_repo.exists_by_name(&request.name).await? {
            return Err(AppError::Business(ErrorCode::UserNameAlreadyUse));
        }

        if self.user_repo.exists_by_email(&request.email).await? {
            return Err(AppError::Business(ErrorCode::EmailAlreadyUse));
        }

        self.mail_service.send_code(&request.email, CodePurpose::Register).await
    }

    /// 회원가입 2단계: 인증 코드를 확인하고 계정을 생성합니다.
    ///
    /// 인증 코드는 계정 생성에 성공한 뒤에만 제거되므로, 복호화 실패나
    /// 중복 충돌로 실패한 요청은 같은 코드로 다시 시도할 수 있습니다.
    pub async fn create_new_user(&self, request: CheckRegisterEmailCodeRequest) -> Result<LoginResponseData, AppError> {
        let start_time = std::time::Instant::now();

        let password = self.cipher_service.decrypt(&request.password)?;

        self.mail_service
            .verify_code(&request.email, &request.code, CodePurpose::Register)
            .await?;

        let hash_start = std::time::Instant::now();
        let password_hash = bcrypt::hash(&password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new(request.name, request.email, password_hash);
        let created = self.user_repo.create(user).await?;

        if let Err(e) = self.mail_service.consume_code(&created.email, CodePurpose::Register).await {
            log::warn!("⚠️ 회원가입 인증 코드 제거 실패 ({}): {}", created.email, e);
        }

        let token = self.token_service.generate_token(&created)?;

        log::info!("🆕 사용자 생성: {} ({:?})", created.name, start_time.elapsed());

        Ok(LoginResponseData::new(token, created))
    }

    /// 이름 + 비밀번호 로그인
    ///
    /// # Errors
    ///
    /// * `ErrorCode::BadRequest` (400) - 이름 또는 비밀번호 누락
    /// * `ErrorCode::UserNotFound` (1004)
    /// * `ErrorCode::PasswordIncorrect` (1005)
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponseData, AppError> {
        ensure_login_fields(&request)?;

        let user = self.user_repo
            .find_by_name(&request.name)
            .await?
            .ok_or(AppError::Business(ErrorCode::UserNotFound))?;

        let password = self.cipher_service.decrypt(&request.password)?;

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(&password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            log::warn!("🔒 비밀번호 불일치: {}", user.name);
            return Err(AppError::Business(ErrorCode::PasswordIncorrect));
        }

        self.complete_login(user).await
    }

    /// 이메일 로그인 코드를 확인하고 로그인합니다. 확인된 코드는 즉시 제거됩니다.
    ///
    /// # Errors
    ///
    /// * `ErrorCode::EmailNotFound` (1006)
    /// * `ErrorCode::EmailCodeIncorrect` (1008)
    pub async fn email_login_code_check(&self, email: &str, code: &str) -> Result<LoginResponseData, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                log::warn!("📭 가입되지 않은 이메일: {}", email);
                AppError::Business(ErrorCode::EmailNotFound)
            })?;

        self.mail_service.check_code(email, code, CodePurpose::Login).await?;

        self.complete_login(user).await
    }

    /// 가입된 이메일로 로그인 코드를 발송합니다.
    pub async fn send_login_code(&self, email: &str) -> Result<(), AppError> {
        if !self.user_repo.exists_by_email(email).await? {
            log::warn!("📭 가입되지 않은 이메일: {}", email);
            return Err(AppError::Business(ErrorCode::EmailNotFound));
        }

        self.mail_service.send_code(email, CodePurpose::Login).await
    }

    /// 변경된 필드만 저장합니다.
    ///
    /// # Errors
    ///
    /// * `ErrorCode::BadRequest` (400) - `userName`, `email`, `phone`, `avatar` 중 빈 값
    /// * `ErrorCode::UserNotFound` (1004)
    /// * `ErrorCode::UserNameAlreadyUse` (1002), `ErrorCode::EmailAlreadyUse` (1001)
    /// * `ErrorCode::UserInfoUpdateFailed` (1003) - 저장소 오류
    pub async fn update_user_info(&self, user_id: &str, request: UpdateUserInfoRequest) -> Result<(), AppError> {
        ensure_user_info_required(&request)?;

        let user = self.find_user(user_id).await?;
        let changes = user_info_changes(&user, &request);

        self.apply_changes(&user, changes).await
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<GetProfileResponseData, AppError> {
        let user = self.find_user(user_id).await?;
        Ok(GetProfileResponseData::from(&user))
    }

    /// 닉네임(이름)과 이메일을 수정합니다. 빈 닉네임은 기존 이름을 유지합니다.
    pub async fn update_profile(&self, user_id: &str, request: UpdateProfileRequest) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;
        let changes = profile_changes(&user, &request);

        self.apply_changes(&user, changes).await
    }

    async fn find_user(&self, user_id: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Business(ErrorCode::UserNotFound))
    }

    async fn complete_login(&self, user: User) -> Result<LoginResponseData, AppError> {
        let user = self.user_repo.record_login(&user).await?;
        let token = self.token_service.generate_token(&user)?;

        log::info!("🔓 로그인 성공: {}", user.name);

        Ok(LoginResponseData::new(token, user))
    }

    async fn apply_changes(&self, user: &User, changes: Document) -> Result<(), AppError> {
        if changes.is_empty() {
            return Ok(());
        }

        if let Ok(name) = changes.get_str("name") {
            if self.user_repo.exists_by_name(name).await? {
                return Err(AppError::Business(ErrorCode::UserNameAlreadyUse));
            }
        }

        if let Ok(email) = changes.get_str("email") {
            if self.user_repo.exists_by_email(email).await? {
                return Err(AppError::Business(ErrorCode::EmailAlreadyUse));
            }
        }

        let updated = self.user_repo
            .update_fields(user, changes)
            .await
            .map_err(|e| match e {
                AppError::Business(code) => AppError::Business(code),
                other => {
                    log::error!("❌ 사용자 정보 저장 실패: {}", other);
                    AppError::Business(ErrorCode::UserInfoUpdateFailed)
                }
            })?;

        match updated {
            Some(_) => Ok(()),
            None => Err(AppError::Business(ErrorCode::UserNotFound)),
        }
    }
}

pub fn ensure_passwords_match(password: &str, re_password: &str) -> Result<(), AppError> {
    if password != re_password {
        return Err(AppError::ValidationError("두 비밀번호가 일치하지 않습니다".to_string()));
    }
    Ok(())
}

pub fn ensure_login_fields(request: &LoginRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() || request.password.trim().is_empty() {
        return Err(AppError::Business(ErrorCode::BadRequest));
    }
    Ok(())
}

/// `userName`, `email`, `phone`, `avatar`는 비어 있을 수 없습니다.
pub fn ensure_user_info_required(request: &UpdateUserInfoRequest) -> Result<(), AppError> {
    let required = [&request.user_name, &request.email, &request.phone, &request.avatar];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::Business(ErrorCode::BadRequest));
    }
    Ok(())
}

/// 현재 사용자와 요청을 비교하여 변경된 필드의 `$set` 문서를 만듭니다.
///
/// `clientIp` / `clientPort`는 값이 있을 때만 반영합니다.
pub fn user_info_changes(current: &User, request: &UpdateUserInfoRequest) -> Document {
    let mut changes = Document::new();

    let candidates = [
        ("avatar", &current.avatar, &request.avatar),
        ("email", &current.email, &request.email),
        ("motto", &current.motto, &request.motto),
        ("phone", &current.phone, &request.phone),
        ("name", &current.name, &request.user_name),
    ];

    for (field, old, new) in candidates {
        if old != new {
            changes.insert(field, new.as_str());
        }
    }

    if !request.client_ip.is_empty() && request.client_ip != current.client_ip {
        changes.insert("client_ip", request.client_ip.as_str());
    }

    if !request.client_port.is_empty() && request.client_port != current.client_port {
        changes.insert("client_port", request.client_port.as_str());
    }

    changes
}

pub fn profile_changes(current: &User, request: &UpdateProfileRequest) -> Document {
    let mut changes = doc! {};

    if !request.nickname.trim().is_empty() && request.nickname != current.name {
        changes.insert("name", request.nickname.as_str());
    }

    if request.email != current.email {
        changes.insert("email", request.email.as_str());
    }

    changes
}

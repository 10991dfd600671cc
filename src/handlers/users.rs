//! # 사용자 API 핸들러
//!
//! `/v1/user` 스코프의 엔드포인트입니다. 요청 검증 후 `UserService`에 위임하고
//! 결과를 `ApiResponse` 봉투로 감싸 반환합니다.

use actix_web::{web, HttpResponse, get, post, put};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::users::request::{
    CheckRegisterEmailCodeRequest, EmailLoginCheckRequest, EmailLoginRequest, LoginRequest,
    RegisterRequest, UpdateProfileRequest, UpdateUserInfoRequest,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::CipherService;
use crate::services::users::user_service::UserService;

/// 회원가입 인증 코드 발송 → `data: true`
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(true)))
}

/// 인증 코드 확인 후 계정 생성 → `data: { token, user }`
#[post("/register_email_code_check")]
pub async fn register_email_code_check(
    payload: web::Json<CheckRegisterEmailCodeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let response = service.create_new_user(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let response = service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

#[post("/email_login_code_check")]
pub async fn email_login_code_check(
    payload: web::Json<EmailLoginCheckRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    let response = service
        .email_login_code_check(&payload.email, &payload.code)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// 로그인 인증 코드 발송 → `data: true`
#[post("/email_login")]
pub async fn email_login(
    payload: web::Json<EmailLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    service.send_login_code(&payload.email).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(true)))
}

#[post("/user_info_update", wrap = "AuthMiddleware::strict()")]
pub async fn user_info_update(
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserInfoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    service.update_user_info(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

#[get("/profile", wrap = "AuthMiddleware::strict()")]
pub async fn get_profile(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let profile = service.get_profile(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}

#[put("/profile", wrap = "AuthMiddleware::strict()")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let service = UserService::instance();
    service.update_profile(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

/// 비밀번호 암호화용 RSA 공개키 (SPKI PEM)
#[get("/public_key")]
pub async fn public_key() -> Result<HttpResponse, AppError> {
    let cipher = CipherService::instance();

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .json(ApiResponse::success(cipher.public_key_pem())))
}

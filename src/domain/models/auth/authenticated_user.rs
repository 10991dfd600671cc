use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::core::errors::{AppError, ErrorCode};
use crate::domain::models::token::TokenClaims;

/// JWT 토큰에서 추출된 사용자 정보
///
/// `AuthMiddleware`가 토큰 검증에 성공하면 요청 extensions에 저장하며,
/// 핸들러에서는 추출자로 바로 받을 수 있습니다.
///
/// ```rust,ignore
/// #[get("/profile", wrap = "AuthMiddleware::strict()")]
/// async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> { ... }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 ID (ObjectId hex)
    pub user_id: String,

    /// 사용자 이름
    pub name: String,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::Business(ErrorCode::Unauthorized))),
        }
    }
}

/// 선택적 인증 사용자 추출자 (lenient 라우트용)
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

//! # 인증 미들웨어
//!
//! `Authorization: Bearer <jwt>` 헤더를 검증하고 `AuthenticatedUser`를
//! 요청 extensions에 저장합니다.
//!
//! | 모드 | 토큰 없음/무효 | 토큰 유효 |
//! |------|---------------|-----------|
//! | `strict()` | 401 `{code:401, message:"Unauthorized"}` | 사용자 저장 후 진행 |
//! | `lenient()` | 사용자 없이 진행 | 사용자 저장 후 진행 |
//!
//! ```rust,ignore
//! #[get("/profile", wrap = "AuthMiddleware::strict()")]
//! async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> { ... }
//!
//! web::scope("/v1/upload").wrap(AuthMiddleware::strict())
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    pub fn strict() -> Self {
        Self::new(AuthMode::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(AuthMode::Lenient)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use chrono::{Duration, Utc};
    use mongodb::bson::oid::ObjectId;
    use crate::config::JwtConfig;
    use crate::domain::entities::users::user::User;
    use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
    use crate::services::auth::token_service::{build_claims, encode_claims};

    fn bearer_for(name: &str, issued_at: chrono::DateTime<Utc>, days: i64) -> (String, String) {
        let mut user = User::new(name.to_string(), format!("{}@example.com", name), "hash".to_string());
        user.id = Some(ObjectId::new());

        let claims = build_claims(&user, issued_at, days).unwrap();
        let token = encode_claims(&claims, &JwtConfig::secret()).unwrap();
        (format!("Bearer {}", token), claims.sub)
    }

    async fn required_user(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(format!("{}:{}", user.user_id, user.name))
    }

    async fn whoami(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(user) => HttpResponse::Ok().body(user.name),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_strict_rejects_missing_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::strict())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 401);
        assert_eq!(body["message"], "Unauthorized");
    }

    #[actix_web::test]
    async fn test_strict_rejects_non_bearer_scheme() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::strict())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Basic YWxhbjpzZWNyZXQ="))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_lenient_passes_without_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::lenient())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_strict_accepts_valid_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::strict())
                    .route(web::get().to(required_user)),
            ),
        )
        .await;

        let (header, user_id) = bearer_for("alan", Utc::now(), 90);
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, format!("{}:alan", user_id));
    }

    #[actix_web::test]
    async fn test_strict_rejects_expired_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::strict())
                    .route(web::get().to(required_user)),
            ),
        )
        .await;

        let (header, _) = bearer_for("alan", Utc::now() - Duration::days(10), 1);
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 401);
        assert_eq!(body["message"], "Unauthorized");
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn test_lenient_attaches_user_from_valid_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::lenient())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let (header, _) = bearer_for("turing", Utc::now(), 1);
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let body = test::read_body(resp).await;
        assert_eq!(body, "turing");
    }
}

//! API 라우트 설정 모듈
//!
//! | Method | Path | 인증 |
//! |--------|------|------|
//! | GET  | `/` | - |
//! | GET  | `/health` | - |
//! | GET  | `/v1/user/public_key` | - |
//! | POST | `/v1/user/register` | - |
//! | POST | `/v1/user/register_email_code_check` | - |
//! | POST | `/v1/user/login` | - |
//! | POST | `/v1/user/email_login_code_check` | - |
//! | POST | `/v1/user/email_login` | - |
//! | POST | `/v1/user/user_info_update` | strict |
//! | GET  | `/v1/user/profile` | strict |
//! | PUT  | `/v1/user/profile` | strict |
//! | POST | `/v1/upload/file` | strict |
//!
//! # Auth Middleware Usage
//!
//! 같은 스코프 안에서 공개 라우트와 보호 라우트가 섞여 있으면
//! 핸들러 매크로의 `wrap` 속성으로 라우트 단위 인증을 적용합니다.
//!
//! ```rust,ignore
//! #[post("/user_info_update", wrap = "AuthMiddleware::strict()")]
//! ```
//!
//! 스코프 전체가 보호 대상이면 스코프에 미들웨어를 적용합니다.
//!
//! ```rust,ignore
//! web::scope("/v1/upload").wrap(AuthMiddleware::strict())
//! ```

use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // JSON 바인딩 실패도 공통 응답 봉투(400)로 반환
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }));

    cfg.service(handlers::system::index);
    cfg.service(handlers::system::health_check);

    configure_user_routes(cfg);
    configure_upload_routes(cfg);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/user")
            .service(handlers::users::public_key)
            .service(handlers::users::register)
            .service(handlers::users::register_email_code_check)
            .service(handlers::users::login)
            .service(handlers::users::email_login_code_check)
            .service(handlers::users::email_login)
            // 보호 라우트 (wrap = "AuthMiddleware::strict()")
            .service(handlers::users::user_info_update)
            .service(handlers::users::get_profile)
            .service(handlers::users::update_profile)
    );
}

fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/upload")
            .wrap(AuthMiddleware::strict())
            .service(handlers::upload::upload_file)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_protected_user_routes_require_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for req in [
            test::TestRequest::get().uri("/v1/user/profile").to_request(),
            test::TestRequest::put().uri("/v1/user/profile").to_request(),
            test::TestRequest::post().uri("/v1/user/user_info_update").to_request(),
            test::TestRequest::post().uri("/v1/upload/file").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], 401);
        }
    }

    #[actix_web::test]
    async fn test_malformed_json_returns_envelope() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/v1/user/register")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn test_public_routes_are_reachable() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/v1/user/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

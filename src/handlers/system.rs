use actix_web::{get, HttpResponse};
use serde_json::json;
use crate::domain::dto::common::ApiResponse;

#[get("/")]
pub async fn index() -> HttpResponse {
    log::debug!("hello");
    HttpResponse::Ok().json(ApiResponse::success(json!({
        ":)": "Thank you for using chat_user_service!"
    })))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "chat_user_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

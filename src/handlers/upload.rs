//! 파일 업로드 핸들러 (`multipart/form-data`, 필드 이름 `file`)

use actix_multipart::Multipart;
use actix_web::{post, HttpResponse};
use futures_util::StreamExt;
use crate::config::StorageConfig;
use crate::core::errors::{AppError, ErrorCode};
use crate::domain::dto::common::ApiResponse;
use crate::services::storage::UploadService;

/// 업로드된 파일의 공개 URL → `data: "https://..."`
///
/// `file` 필드가 없으면 400, 읽기 실패나 크기 초과, 업로드 실패는 600을 반환합니다.
#[post("/file")]
pub async fn upload_file(
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let (filename, bytes) = read_file_field(&mut payload, StorageConfig::max_file_bytes()).await?;

    let service = UploadService::instance();
    let url = service.upload_bytes(&filename, bytes).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(url)))
}

async fn read_file_field(payload: &mut Multipart, max_bytes: usize) -> Result<(String, Vec<u8>), AppError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            log::warn!("⚠️ multipart 파싱 실패: {}", e);
            AppError::Business(ErrorCode::BadRequest)
        })?;

        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                log::warn!("⚠️ 업로드 파일 읽기 실패: {}", e);
                AppError::Business(ErrorCode::FileUploadFailed)
            })?;

            if bytes.len() + data.len() > max_bytes {
                log::warn!("⚠️ 업로드 크기 초과: {} (> {} bytes)", filename, max_bytes);
                return Err(AppError::Business(ErrorCode::FileUploadFailed));
            }
            bytes.extend_from_slice(&data);
        }

        return Ok((filename, bytes));
    }

    Err(AppError::Business(ErrorCode::BadRequest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App};

    const BOUNDARY: &str = "----chatboundary";

    fn multipart_request(uri: &str, body: String) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    fn file_part(filename: &str, content: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: text/plain\r\n\r\n{c}\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = filename,
            c = content
        )
    }

    /// 8바이트 제한으로 파일 필드만 읽어 크기를 돌려주는 핸들러
    async fn read_capped(mut payload: Multipart) -> Result<HttpResponse, AppError> {
        let (filename, bytes) = read_file_field(&mut payload, 8).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(format!("{}:{}", filename, bytes.len()))))
    }

    #[actix_web::test]
    async fn test_file_within_limit_is_read() {
        let app = test::init_service(
            App::new().route("/capped", web::post().to(read_capped)),
        )
        .await;

        let resp = test::call_service(&app, multipart_request("/capped", file_part("a.txt", "hello")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], "a.txt:5");
    }

    #[actix_web::test]
    async fn test_oversized_file_is_upload_failure() {
        let app = test::init_service(
            App::new().route("/capped", web::post().to(read_capped)),
        )
        .await;

        let resp = test::call_service(
            &app,
            multipart_request("/capped", file_part("big.txt", "0123456789abcdef")).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 600);
        assert_eq!(body["message"], "File upload failed.");
    }

    #[actix_web::test]
    async fn test_missing_file_field_is_bad_request() {
        let app = test::init_service(App::new().service(upload_file)).await;

        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
            b = BOUNDARY
        );
        let req = multipart_request("/file", body).to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
    }
}

//! # HTTP 메일 API 클라이언트
//!
//! Postmark 호환 API(`POST {base_url}/email`)로 트랜잭션 메일을 발송합니다.
//!
//! ```text
//! POST /email
//! X-Postmark-Server-Token: <token>
//! { "From": ..., "To": ..., "Subject": ..., "HtmlBody": ..., "TextBody": ... }
//! ```

use std::time::Duration;
use serde::Serialize;

pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    sender: String,
    auth_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        auth_token: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            auth_token,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/email", self.base_url.trim_end_matches('/'))
    }

    /// 메일을 발송합니다. 2xx 이외의 응답은 에러로 처리됩니다.
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: recipient,
            subject,
            html_body: html_content,
            text_body: text_content,
        };

        self.http_client
            .post(self.endpoint())
            .header("X-Postmark-Server-Token", &self.auth_token)
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> EmailClient {
        EmailClient::new(
            base_url.to_string(),
            "noreply@example.com".to_string(),
            "token".to_string(),
            Duration::from_millis(200),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(client("https://api.postmarkapp.com").endpoint(), "https://api.postmarkapp.com/email");
        assert_eq!(client("http://localhost:8025/").endpoint(), "http://localhost:8025/email");
    }

    #[test]
    fn test_request_body_uses_pascal_case_keys() {
        let body = SendEmailRequest {
            from: "noreply@example.com",
            to: "alan@example.com",
            subject: "Login verification code",
            html_body: "<h1>123456</h1>",
            text_body: "123456",
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["From"], "noreply@example.com");
        assert_eq!(json["To"], "alan@example.com");
        assert_eq!(json["HtmlBody"], "<h1>123456</h1>");
        assert_eq!(json["TextBody"], "123456");
    }

    #[actix_web::test]
    async fn test_unreachable_server_is_an_error() {
        let result = client("http://127.0.0.1:9")
            .send_email("alan@example.com", "subject", "<p>body</p>", "body")
            .await;

        assert!(result.is_err());
    }
}

//! 메일 발송과 이메일 인증 코드

pub mod email_client;
pub mod mail_service;

pub use email_client::EmailClient;
pub use mail_service::MailService;

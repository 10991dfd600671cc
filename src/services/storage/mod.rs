//! 오브젝트 스토리지 업로드

pub mod upload_service;

pub use upload_service::UploadService;

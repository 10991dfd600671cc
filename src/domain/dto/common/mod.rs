//! 공통 응답 DTO

pub mod api_response;

pub use api_response::ApiResponse;

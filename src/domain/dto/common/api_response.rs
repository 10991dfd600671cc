use serde::{Deserialize, Serialize};
use crate::core::errors::ErrorCode;

/// 모든 API 응답에 공통으로 사용하는 봉투
///
/// ```json
/// { "code": 0, "message": "ok", "data": { ... } }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: ErrorCode::Success.message().to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// 데이터 없이 성공만 알리는 응답 (`data: null`)
    pub fn ok() -> Self {
        Self {
            code: ErrorCode::Success.code(),
            message: ErrorCode::Success.message().to_string(),
            data: None,
        }
    }
}

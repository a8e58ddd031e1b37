use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

/// 统一的 API 响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message)
    }

    fn build(code: ErrorCode, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, None, message)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_error_omits_data() {
        let resp = ApiResponse::error_empty(ErrorCode::NotFound, "missing");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 1004);
        assert!(json.get("data").is_none());
    }
}

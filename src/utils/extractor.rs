//! 路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应，处理函数拿到的都是合法值。

use actix_web::{HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

pub(crate) fn bad_path_param(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 正整数 ID 路径参数
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                let parsed = raw
                    .parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .map($name)
                    .ok_or_else(|| {
                        $crate::utils::extractor::bad_path_param(format!(
                            "路径参数 {} 无效: '{}'",
                            $param, raw
                        ))
                    });
                std::future::ready(parsed)
            }
        }
    };
}

/// 字符串编号路径参数（学号、教学班编号）
#[macro_export]
macro_rules! define_safe_code_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub String);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                let parsed = match $crate::utils::validate::validate_code(raw) {
                    Ok(()) => Ok($name(raw.to_string())),
                    Err(msg) => Err($crate::utils::extractor::bad_path_param(format!(
                        "路径参数 {} 无效: {}",
                        $param, msg
                    ))),
                };
                std::future::ready(parsed)
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_code_extractor!(SafeCode, "code");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{FromRequest, test::TestRequest};

    #[actix_web::test]
    async fn test_safe_id_accepts_positive() {
        let (req, mut payload) = TestRequest::default()
            .param("id", "42")
            .to_http_parts();
        let id = SafeIDI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_safe_id_rejects_invalid() {
        for raw in ["0", "-3", "abc", ""] {
            let (req, mut payload) = TestRequest::default().param("id", raw).to_http_parts();
            assert!(SafeIDI64::from_request(&req, &mut payload).await.is_err());
        }
    }

    #[actix_web::test]
    async fn test_safe_code() {
        let (req, mut payload) = TestRequest::default()
            .param("code", "SEC001")
            .to_http_parts();
        assert_eq!(SafeCode::from_request(&req, &mut payload).await.unwrap().0, "SEC001");

        let (req, mut payload) = TestRequest::default()
            .param("code", "bad code!")
            .to_http_parts();
        assert!(SafeCode::from_request(&req, &mut payload).await.is_err());
    }
}

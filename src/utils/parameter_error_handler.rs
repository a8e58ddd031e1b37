//! 请求参数解析失败时统一返回 ApiResponse

use actix_web::{
    HttpRequest, HttpResponse,
    error::{Error, InternalError, JsonPayloadError, QueryPayloadError},
};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("请求体解析失败: {err}");
    tracing::debug!("JSON payload rejected: {}", err);
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("查询参数无效: {err}");
    tracing::debug!("Query string rejected: {}", err);
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

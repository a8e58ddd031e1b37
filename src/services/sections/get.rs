use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn get_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_section_by_id(section_id).await {
        Ok(Some(section)) => Ok(HttpResponse::Ok().json(ApiResponse::success(section, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SectionNotFound,
            "教学班不存在",
        ))),
        Err(e) => Ok(internal_error("查询教学班失败", e)),
    }
}

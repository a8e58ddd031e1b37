use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::sections::requests::CreateSectionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::validate::validate_code;

pub async fn create_section(
    service: &SectionService,
    request: &HttpRequest,
    mut req: CreateSectionRequest,
) -> ActixResult<HttpResponse> {
    req.section_id = req.section_id.trim().to_string();
    if let Err(msg) = validate_code(&req.section_id) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if req.section_code.trim().is_empty() || req.semester.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "教学班代码和学期不能为空",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_section_by_id(&req.section_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SectionAlreadyExists,
                "教学班编号已存在",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("查询教学班失败", e)),
    }

    match storage.get_instructor_by_id(req.instructor_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::InstructorNotFound,
                "教师不存在",
            )));
        }
        Err(e) => return Ok(internal_error("查询教师失败", e)),
    }

    match storage.create_section(req).await {
        Ok(section) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(section, "教学班创建成功")))
        }
        Err(e) => Ok(internal_error("创建教学班失败", e)),
    }
}

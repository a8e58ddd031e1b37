use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstructorService;
use crate::models::instructors::requests::CreateInstructorRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::validate::validate_email;

pub async fn create_instructor(
    service: &InstructorService,
    request: &HttpRequest,
    mut req: CreateInstructorRequest,
) -> ActixResult<HttpResponse> {
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_lowercase();

    if req.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "教师姓名不能为空",
        )));
    }
    if let Err(msg) = validate_email(&req.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_instructor_by_email(&req.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::InstructorAlreadyExists,
                "该邮箱已被其他教师使用",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("检查教师邮箱失败", e)),
    }

    match storage.create_instructor(req).await {
        Ok(instructor) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(instructor, "教师创建成功"))),
        Err(e) => Ok(internal_error("创建教师失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::utils::validate::{validate_code, validate_email};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut req: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    req.student_id = req.student_id.trim().to_string();
    req.email = req.email.trim().to_lowercase();

    if let Err(msg) = validate_code(&req.student_id).and_then(|_| validate_email(&req.email)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if req.group_number < 1 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "小组编号必须大于 0",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_section_by_id(&req.section_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SectionNotFound,
                "教学班不存在",
            )));
        }
        Err(e) => return Ok(internal_error("查询教学班失败", e)),
    }

    let duplicate_id = storage.get_student_by_id(&req.student_id).await;
    let duplicate_email = storage.get_student_by_email(&req.email).await;
    match (duplicate_id, duplicate_email) {
        (Ok(None), Ok(None)) => {}
        (Ok(Some(_)), _) | (_, Ok(Some(_))) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::StudentAlreadyExists,
                "学号或邮箱已存在",
            )));
        }
        (Err(e), _) | (_, Err(e)) => return Ok(internal_error("查询学生失败", e)),
    }

    match storage.create_student(req).await {
        Ok(student) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "学生创建成功")))
        }
        Err(e) => Ok(internal_error("创建学生失败", e)),
    }
}

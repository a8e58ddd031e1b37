use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn get_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "查询成功"))),
        Ok(None) => Ok(grade_not_found()),
        Err(e) => Ok(internal_error("查询评分失败", e)),
    }
}

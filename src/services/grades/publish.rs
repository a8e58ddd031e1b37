use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn publish_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.publish_grade(grade_id).await {
        Ok(Some(grade)) => {
            tracing::info!("Grade {} published", grade.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "成绩已发布")))
        }
        Ok(None) => Ok(grade_not_found()),
        Err(e) => Ok(internal_error("发布成绩失败", e)),
    }
}

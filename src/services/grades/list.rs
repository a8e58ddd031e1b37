use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::ApiResponse;
use crate::models::grades::requests::GradeListParams;
use crate::services::internal_error;

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grades_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询评分列表失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::requests::AssignmentListParams;
use crate::services::internal_error;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_assignments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询作业列表失败", e)),
    }
}

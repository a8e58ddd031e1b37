use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::SubmissionListParams;
use crate::services::internal_error;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_submissions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询提交列表失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission};
use crate::models::ApiResponse;

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_submission(&storage, submission_id).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功"))),
        Err(response) => Ok(response),
    }
}

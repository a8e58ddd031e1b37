use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstructorService;
use crate::models::ApiResponse;
use crate::models::instructors::requests::InstructorListParams;
use crate::services::internal_error;

pub async fn list_instructors(
    service: &InstructorService,
    request: &HttpRequest,
    query: InstructorListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_instructors_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询教师列表失败", e)),
    }
}

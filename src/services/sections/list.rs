use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::ApiResponse;
use crate::models::sections::requests::SectionListParams;
use crate::services::internal_error;

pub async fn list_sections(
    service: &SectionService,
    request: &HttpRequest,
    query: SectionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_sections_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询教学班列表失败", e)),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::sections::requests::{CreateSectionRequest, SectionListParams};
use crate::services::SectionService;
use crate::utils::SafeCode;

static SECTION_SERVICE: Lazy<SectionService> = Lazy::new(SectionService::new_lazy);

pub async fn list_sections(
    req: HttpRequest,
    query: web::Query<SectionListParams>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.list_sections(&req, query.into_inner()).await
}

pub async fn create_section(
    req: HttpRequest,
    body: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.create_section(&req, body.into_inner()).await
}

// 教学班编号为字符串主键
pub async fn get_section(req: HttpRequest, path: SafeCode) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.get_section(&req, &path.0).await
}

pub fn configure_sections_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sections")
            .service(
                web::resource("")
                    .route(web::get().to(list_sections))
                    .route(web::post().to(create_section)),
            )
            .service(web::resource("/{code}").route(web::get().to(get_section))),
    );
}

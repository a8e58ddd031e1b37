use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::instructors::requests::{CreateInstructorRequest, InstructorListParams};
use crate::services::InstructorService;
use crate::utils::SafeIDI64;

static INSTRUCTOR_SERVICE: Lazy<InstructorService> = Lazy::new(InstructorService::new_lazy);

pub async fn list_instructors(
    req: HttpRequest,
    query: web::Query<InstructorListParams>,
) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE
        .list_instructors(&req, query.into_inner())
        .await
}

pub async fn create_instructor(
    req: HttpRequest,
    body: web::Json<CreateInstructorRequest>,
) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE
        .create_instructor(&req, body.into_inner())
        .await
}

pub async fn get_instructor(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE.get_instructor(&req, path.0).await
}

pub fn configure_instructors_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/instructors")
            .service(
                web::resource("")
                    .route(web::get().to(list_instructors))
                    .route(web::post().to(create_instructor)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_instructor))),
    );
}

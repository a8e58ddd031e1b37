use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::grades::requests::{GradeListParams, ReviewGradeRequest};
use crate::services::GradeService;
use crate::utils::SafeIDI64;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListParams>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn get_grade(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_grade(&req, path.0).await
}

pub async fn review_grade(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ReviewGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .review_grade(&req, path.0, body.into_inner())
        .await
}

pub async fn publish_grade(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.publish_grade(&req, path.0).await
}

pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .service(web::resource("").route(web::get().to(list_grades)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_grade))
                    .route(web::put().to(review_grade)),
            )
            .service(web::resource("/{id}/publish").route(web::post().to(publish_grade))),
    );
}

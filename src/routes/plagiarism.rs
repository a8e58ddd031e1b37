use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::plagiarism::requests::{
    DetectPlagiarismRequest, PlagiarismListParams, ReviewPlagiarismRequest,
};
use crate::services::PlagiarismService;
use crate::utils::SafeIDI64;

static PLAGIARISM_SERVICE: Lazy<PlagiarismService> = Lazy::new(PlagiarismService::new_lazy);

pub async fn detect(
    req: HttpRequest,
    body: web::Json<DetectPlagiarismRequest>,
) -> ActixResult<HttpResponse> {
    PLAGIARISM_SERVICE.detect(&req, body.into_inner()).await
}

pub async fn list_detections(
    req: HttpRequest,
    query: web::Query<PlagiarismListParams>,
) -> ActixResult<HttpResponse> {
    PLAGIARISM_SERVICE
        .list_detections(&req, query.into_inner())
        .await
}

pub async fn get_detection(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    PLAGIARISM_SERVICE.get_detection(&req, path.0).await
}

pub async fn review_detection(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ReviewPlagiarismRequest>,
) -> ActixResult<HttpResponse> {
    PLAGIARISM_SERVICE
        .review_detection(&req, path.0, body.into_inner())
        .await
}

pub fn configure_plagiarism_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/plagiarism")
            .service(web::resource("").route(web::get().to(list_detections)))
            .service(
                web::resource("/detect")
                    .wrap(RateLimit::plagiarism())
                    .route(web::post().to(detect)),
            )
            .service(web::resource("/{id}").route(web::get().to(get_detection)))
            .service(web::resource("/{id}/review").route(web::put().to(review_detection))),
    );
}

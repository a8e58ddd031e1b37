use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RateLimit;
use crate::models::submissions::requests::SubmissionListParams;
use crate::services::SubmissionService;
use crate::services::submissions::DownloadTarget;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn create_submission(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.create_submission(&req, payload).await
}

pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

pub async fn delete_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.delete_submission(&req, path.0).await
}

pub async fn evaluate_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.evaluate_submission(&req, path.0).await
}

pub async fn analyze_video(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.analyze_video(&req, path.0).await
}

pub async fn download_project(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download(&req, path.0, DownloadTarget::Project)
        .await
}

pub async fn download_video(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download(&req, path.0, DownloadTarget::Video)
        .await
}

pub async fn list_logs(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_logs(&req, path.0).await
}

pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(create_submission)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_submission))
                    .route(web::delete().to(delete_submission)),
            )
            // 同步调用模型服务的接口限流
            .service(
                web::resource("/{id}/evaluate")
                    .wrap(RateLimit::evaluation())
                    .route(web::post().to(evaluate_submission)),
            )
            .service(
                web::resource("/{id}/analyze-video")
                    .wrap(RateLimit::video_analysis())
                    .route(web::post().to(analyze_video)),
            )
            .service(web::resource("/{id}/download/project").route(web::get().to(download_project)))
            .service(web::resource("/{id}/download/video").route(web::get().to(download_video)))
            .service(web::resource("/{id}/logs").route(web::get().to(list_logs))),
    );
}

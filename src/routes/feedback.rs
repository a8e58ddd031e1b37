use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::feedback::requests::FeedbackListParams;
use crate::services::FeedbackService;
use crate::utils::SafeIDI64;

static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

pub async fn list_feedback(
    req: HttpRequest,
    query: web::Query<FeedbackListParams>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.list_feedback(&req, query.into_inner()).await
}

pub async fn get_feedback(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.get_feedback(&req, path.0).await
}

pub fn configure_feedback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feedback")
            .service(web::resource("").route(web::get().to(list_feedback)))
            .service(web::resource("/{id}").route(web::get().to(get_feedback))),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn health(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health(&request).await
}

pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middleware::Compress::default())
            .route("/health", web::get().to(health)),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SystemService;
use crate::blob::BlobStore;
use crate::cache::ObjectCache;
use crate::clients::AiClients;
use crate::evaluation::ReferenceSet;
use crate::models::system::responses::{ComponentHealth, HealthResponse};
use crate::models::{ApiResponse, AppStartTime};
use crate::services::{shared, storage_from};

fn overall_status(components: &[&ComponentHealth]) -> &'static str {
    if components.iter().all(|c| c.healthy) {
        "healthy"
    } else {
        "degraded"
    }
}

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = storage_from(request);
    let blob = shared::<Arc<dyn BlobStore>>(request);
    let cache = shared::<Arc<dyn ObjectCache>>(request);
    let clients = shared::<AiClients>(request);
    let reference = shared::<Arc<ReferenceSet>>(request);
    let started = shared::<AppStartTime>(request);

    let (database, llm_up, blob_store) =
        futures_util::join!(storage.ping(), clients.llm.is_healthy(), blob.check());

    let database = database.map_or_else(|e| ComponentHealth::down(e.to_string()), |_| ComponentHealth::up());
    let llm = if llm_up {
        ComponentHealth::up()
    } else {
        ComponentHealth::down(format!("{} 无法访问", clients.llm.model_name()))
    };
    let blob_store =
        blob_store.map_or_else(|e| ComponentHealth::down(e.to_string()), |_| ComponentHealth::up());

    let status = overall_status(&[&database, &llm, &blob_store]);
    if status != "healthy" {
        tracing::warn!(
            "Health check degraded: database={}, llm={}, blob={}",
            database.healthy,
            llm.healthy,
            blob_store.healthy
        );
    }

    let response = HealthResponse {
        status: status.to_string(),
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_secs: (chrono::Utc::now() - started.start_datetime).num_seconds(),
        database,
        llm,
        blob_store,
        blob_backend: blob.backend_name().to_string(),
        cache_backend: cache.backend_name().to_string(),
        reference_examples: reference.stats(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_status() {
        let up = ComponentHealth::up();
        let down = ComponentHealth::down("timeout");
        assert_eq!(overall_status(&[&up, &up]), "healthy");
        assert_eq!(overall_status(&[&up, &down]), "degraded");
    }
}

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::blob::{BlobStore, create_blob_store};
use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::clients::AiClients;
use crate::config::AppConfig;
use crate::errors::{CodeMentorError, Result};
use crate::evaluation::{EvaluationPipeline, PipelineSettings, ReferenceSet};
use crate::models::instructors::requests::CreateInstructorRequest;
use crate::models::sections::requests::CreateSectionRequest;
use crate::models::students::requests::CreateStudentRequest;
use crate::storage::Storage;

/// 服务器运行期间共享的组件
pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub blob: Arc<dyn BlobStore>,
    pub clients: AiClients,
    pub reference: Arc<ReferenceSet>,
    pub pipeline: EvaluationPipeline,
}

/// 按配置创建缓存，失败时退回进程内 moka
async fn create_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    let mut candidates = vec![cache_type];
    if cache_type != "moka" {
        candidates.push("moka");
    }

    for name in candidates {
        let Some(constructor) = get_object_cache_plugin(name) else {
            warn!("Cache backend '{}' not found in registry", name);
            continue;
        };
        match constructor().await {
            Ok(cache) => {
                if name != cache_type {
                    warn!("Using {} cache instead of {}", name, cache_type);
                }
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create {} cache: {}", name, e),
        }
    }

    Err(CodeMentorError::cache_plugin_not_found(format!(
        "No cache backend available (configured: {cache_type})"
    )))
}

/// 空库时写入默认教师、教学班 SEC001 和学生 EST001
pub(crate) async fn seed_defaults(storage: &Arc<dyn Storage>) -> Result<bool> {
    let count = storage.count_instructors().await?;
    if count > 0 {
        debug!("Database already has {} instructor(s), skipping seed", count);
        return Ok(false);
    }

    info!("Empty database, seeding default instructor, section and student");
    let instructor = storage
        .create_instructor(CreateInstructorRequest {
            name: "Default Instructor".to_string(),
            email: "instructor@codementor.local".to_string(),
            role: None,
        })
        .await?;

    let section = storage
        .create_section(CreateSectionRequest {
            section_id: "SEC001".to_string(),
            section_code: "OOP-01".to_string(),
            semester: "1".to_string(),
            year: chrono::Datelike::year(&chrono::Utc::now()),
            instructor_id: instructor.id,
        })
        .await?;

    storage
        .create_student(CreateStudentRequest {
            student_id: "EST001".to_string(),
            first_name: "Default".to_string(),
            last_name: "Student".to_string(),
            email: "student@codementor.local".to_string(),
            section_id: section.section_id,
            group_number: 1,
        })
        .await?;

    Ok(true)
}

/// 准备服务器启动所需的全部组件，任何一步失败都会终止启动
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_defaults(&storage).await {
        warn!("Failed to seed default data: {}", e);
    }

    let cache = create_cache(&config.cache.cache_type)
        .await
        .expect("Failed to create cache");
    warn!("Cache backend initialized: {}", cache.backend_name());

    let blob = create_blob_store(&config.blob)
        .await
        .expect("Failed to create blob store");
    warn!("Blob store initialized: {}", blob.backend_name());

    let clients = AiClients::from_config(config).expect("Failed to create AI service clients");
    info!(
        "LLM model: {}, embedding model: {}",
        clients.llm.model_name(),
        clients.embedding.model_name()
    );

    let reference = Arc::new(
        ReferenceSet::load(&config.evaluation.reference_dataset)
            .expect("Failed to read reference dataset"),
    );

    let pipeline = EvaluationPipeline::new(
        storage.clone(),
        blob.clone(),
        cache.clone(),
        clients.clone(),
        reference.clone(),
        PipelineSettings::from_config(config),
    );

    StartupContext {
        storage,
        cache,
        blob,
        clients,
        reference,
        pipeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_seed_defaults_only_on_empty_database() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);

        assert!(seed_defaults(&storage).await.unwrap());
        assert!(storage.get_section_by_id("SEC001").await.unwrap().is_some());
        let student = storage.get_student_by_id("EST001").await.unwrap().unwrap();
        assert_eq!(student.section_id, "SEC001");

        assert!(!seed_defaults(&storage).await.unwrap());
        assert_eq!(storage.count_instructors().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_cache_falls_back_to_moka() {
        let cache = create_cache("memcached").await.unwrap();
        assert_eq!(cache.backend_name(), "moka");
    }
}

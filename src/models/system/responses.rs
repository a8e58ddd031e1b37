use serde::Serialize;
use ts_rs::TS;

use crate::models::evaluation::entities::ReferenceStats;

/// 依赖组件健康状态
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct ComponentHealth {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComponentHealth {
    pub fn up() -> Self {
        Self {
            healthy: true,
            detail: None,
        }
    }

    pub fn down(detail: impl Into<String>) -> Self {
        Self {
            healthy: false,
            detail: Some(detail.into()),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthResponse {
    // healthy / degraded
    pub status: String,
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_secs: i64,
    pub database: ComponentHealth,
    pub llm: ComponentHealth,
    pub blob_store: ComponentHealth,
    pub blob_backend: String,
    pub cache_backend: String,
    pub reference_examples: ReferenceStats,
}

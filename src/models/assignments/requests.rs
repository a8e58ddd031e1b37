use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::Rubric;
use crate::models::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>, // ISO 8601
    pub max_score: Option<f64>,
    pub requirements: Option<String>,
    /// 缺省时使用四项维度、每项 25 分的默认细则
    pub rubric: Option<Rubric>,
    pub section_id: String,
}

/// 更新作业请求（部分更新）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_score: Option<f64>,
    pub requirements: Option<String>,
    pub rubric: Option<Rubric>,
}

/// 作业列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub section_id: Option<String>,
    pub search: Option<String>,
}

impl AssignmentListParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.size)
    }
}

//! 评测流水日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: Option<i64>,
    pub step: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,
    // JSON 文本
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_log(self) -> crate::models::evaluation::entities::EvaluationLog {
        use crate::models::evaluation::entities::EvaluationLog;
        use chrono::{DateTime, Utc};

        EvaluationLog {
            id: self.id,
            submission_id: self.submission_id,
            step: self.step,
            status: self.status,
            message: self.message,
            details: self
                .details
                .and_then(|d| serde_json::from_str(&d).ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}

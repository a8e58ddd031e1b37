//! 评测日志存储操作

use super::SeaOrmStorage;
use crate::entity::evaluation_logs::{ActiveModel, Column, Entity as EvaluationLogs};
use crate::errors::{CodeMentorError, Result};
use crate::models::evaluation::entities::EvaluationLog;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn append_evaluation_log_impl(
        &self,
        submission_id: Option<i64>,
        step: &str,
        status: &str,
        message: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Result<EvaluationLog> {
        let details = details.map(|d| d.to_string());

        let model = ActiveModel {
            submission_id: Set(submission_id),
            step: Set(step.to_string()),
            status: Set(status.to_string()),
            message: Set(message),
            details: Set(details),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("写入评测日志失败: {e}")))?;

        Ok(result.into_log())
    }

    pub async fn list_submission_logs_impl(&self, submission_id: i64) -> Result<Vec<EvaluationLog>> {
        let rows = EvaluationLogs::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询评测日志失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_log()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};
    use serde_json::json;

    #[tokio::test]
    async fn test_logs_are_returned_in_order_with_details() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let submission = fixtures::submission(&storage, assignment.id, "EST001").await;

        storage
            .append_evaluation_log(Some(submission.id), "evaluation", "started", None, None)
            .await
            .unwrap();
        storage
            .append_evaluation_log(
                Some(submission.id),
                "video_analysis",
                "completed",
                Some("done".to_string()),
                Some(json!({"duration": 12.5, "speakers": 2})),
            )
            .await
            .unwrap();
        // 不关联提交的日志不会出现在提交日志中
        storage
            .append_evaluation_log(None, "plagiarism", "started", None, None)
            .await
            .unwrap();

        let logs = storage.list_submission_logs(submission.id).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].step, "evaluation");
        assert_eq!(logs[1].details.as_ref().unwrap()["speakers"], 2);
        assert_eq!(logs[1].message.as_deref(), Some("done"));
    }
}

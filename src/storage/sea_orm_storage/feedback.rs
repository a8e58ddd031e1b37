//! 反馈存储操作

use super::SeaOrmStorage;
use crate::entity::feedback::{Column, Entity as FeedbackEntity};
use crate::errors::{CodeMentorError, Result};
use crate::models::feedback::entities::Feedback;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    pub async fn get_feedback_by_id_impl(&self, id: i64) -> Result<Option<Feedback>> {
        let result = FeedbackEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询反馈失败: {e}")))?;

        Ok(result.map(|m| m.into_feedback()))
    }

    pub async fn list_feedback_impl(
        &self,
        grade_id: Option<i64>,
        submission_id: Option<i64>,
    ) -> Result<Vec<Feedback>> {
        let mut select = FeedbackEntity::find();

        if let Some(grade_id) = grade_id {
            select = select.filter(Column::GradeId.eq(grade_id));
        }
        if let Some(submission_id) = submission_id {
            select = select.filter(Column::SubmissionId.eq(submission_id));
        }

        let rows = select
            .order_by_desc(Column::GeneratedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询反馈列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_feedback()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::models::feedback::entities::CriterionFeedback;
    use crate::models::grades::{entities::CriterionScores, requests::NewAutoGrade};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    #[tokio::test]
    async fn test_feedback_lookup_by_grade_and_submission() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let first = fixtures::submission(&storage, assignment.id, "EST001").await;
        let second = fixtures::submission(&storage, assignment.id, "EST001").await;

        let mut grade_ids = Vec::new();
        for submission_id in [first.id, second.id] {
            let (grade, _) = storage
                .create_auto_grade(NewAutoGrade {
                    submission_id,
                    student_id: "EST001".to_string(),
                    scores: CriterionScores::default(),
                    feedback: CriterionFeedback::default(),
                    general_comments: "Evaluated automatically by AI".to_string(),
                })
                .await
                .unwrap();
            grade_ids.push(grade.id);
        }

        let by_grade = storage.list_feedback(Some(grade_ids[0]), None).await.unwrap();
        assert_eq!(by_grade.len(), 1);
        assert_eq!(by_grade[0].submission_id, first.id);

        let by_submission = storage.list_feedback(None, Some(second.id)).await.unwrap();
        assert_eq!(by_submission.len(), 1);

        let mismatched = storage
            .list_feedback(Some(grade_ids[0]), Some(second.id))
            .await
            .unwrap();
        assert!(mismatched.is_empty());

        let single = storage
            .get_feedback_by_id(by_grade[0].id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            single.general_comments.as_deref(),
            Some("Evaluated automatically by AI")
        );
    }
}

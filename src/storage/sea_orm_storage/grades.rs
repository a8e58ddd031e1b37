//! 评分存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::feedback::{
    ActiveModel as FeedbackActiveModel, Column as FeedbackColumn, Entity as FeedbackEntity,
};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{CodeMentorError, Result};
use crate::models::{
    PaginationInfo,
    feedback::entities::Feedback,
    submissions::entities::SubmissionStatus,
    grades::{
        entities::{Grade, GradeStatus},
        requests::{GradeListParams, NewAutoGrade, ReviewGradeRequest},
        responses::{GradeListResponse, GradeWithFeedback},
    },
};
use crate::utils::round2;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 评分、反馈和提交状态 `evaluated` 在同一事务中写入
    pub async fn create_auto_grade_impl(&self, new: NewAutoGrade) -> Result<(Grade, Feedback)> {
        let now = chrono::Utc::now().timestamp();
        let scores = new.scores;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("开启事务失败: {e}")))?;

        let grade = ActiveModel {
            submission_id: Set(new.submission_id),
            student_id: Set(Some(new.student_id)),
            ai_comprehension_score: Set(Some(scores.comprehension)),
            ai_design_score: Set(Some(scores.design)),
            ai_implementation_score: Set(Some(scores.implementation)),
            ai_functionality_score: Set(Some(scores.functionality)),
            ai_total_score: Set(Some(scores.total())),
            status: Set(GradeStatus::AutoGraded.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| CodeMentorError::database_operation(format!("写入评分失败: {e}")))?;

        let feedback = FeedbackActiveModel {
            grade_id: Set(grade.id),
            submission_id: Set(new.submission_id),
            comprehension_comments: Set(Some(new.feedback.comprehension)),
            design_comments: Set(Some(new.feedback.design)),
            implementation_comments: Set(Some(new.feedback.implementation)),
            functionality_comments: Set(Some(new.feedback.functionality)),
            general_comments: Set(Some(new.general_comments)),
            generated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| CodeMentorError::database_operation(format!("写入反馈失败: {e}")))?;

        Submissions::update_many()
            .col_expr(
                SubmissionColumn::Status,
                sea_orm::sea_query::Expr::value(SubmissionStatus::Evaluated.as_str()),
            )
            .col_expr(SubmissionColumn::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(SubmissionColumn::Id.eq(new.submission_id))
            .exec(&txn)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("更新提交状态失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((grade.into_grade(), feedback.into_feedback()))
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn list_grades_with_pagination_impl(
        &self,
        params: GradeListParams,
    ) -> Result<GradeListResponse> {
        let (page, size) = params.pagination().normalized();

        let mut select = Grades::find();

        if let Some(submission_id) = params.submission_id {
            select = select.filter(Column::SubmissionId.eq(submission_id));
        }
        if let Some(ref student_id) = params.student_id {
            select = select.filter(Column::StudentId.eq(student_id.as_str()));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询评分总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询评分页数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询评分列表失败: {e}")))?;

        // 批量查询反馈，每个评分取最新一条
        let grade_ids: Vec<i64> = grades.iter().map(|g| g.id).collect();
        let mut feedback_map: HashMap<i64, Feedback> = HashMap::new();
        if !grade_ids.is_empty() {
            let rows = FeedbackEntity::find()
                .filter(FeedbackColumn::GradeId.is_in(grade_ids))
                .order_by_asc(FeedbackColumn::Id)
                .all(&self.db)
                .await
                .map_err(|e| CodeMentorError::database_operation(format!("查询反馈失败: {e}")))?;
            for row in rows {
                feedback_map.insert(row.grade_id, row.into_feedback());
            }
        }

        let items = grades
            .into_iter()
            .map(|g| {
                let feedback = feedback_map.remove(&g.id);
                GradeWithFeedback {
                    grade: g.into_grade(),
                    feedback,
                }
            })
            .collect();

        Ok(GradeListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 教师复核：未提供的分数保留原值，四项齐全时重算总分
    pub async fn review_grade_impl(
        &self,
        id: i64,
        review: ReviewGradeRequest,
    ) -> Result<Option<Grade>> {
        let existing = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询评分失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let comprehension = review
            .final_comprehension_score
            .or(existing.final_comprehension_score);
        let design = review.final_design_score.or(existing.final_design_score);
        let implementation = review
            .final_implementation_score
            .or(existing.final_implementation_score);
        let functionality = review
            .final_functionality_score
            .or(existing.final_functionality_score);

        let final_total = match (comprehension, design, implementation, functionality) {
            (Some(c), Some(d), Some(i), Some(f)) => Some(round2(c + d + i + f)),
            _ => existing.final_total_score,
        };

        let mut model: ActiveModel = existing.into();
        model.final_comprehension_score = Set(comprehension);
        model.final_design_score = Set(design);
        model.final_implementation_score = Set(implementation);
        model.final_functionality_score = Set(functionality);
        model.final_total_score = Set(final_total);
        if let Some(notes) = review.instructor_notes {
            model.instructor_notes = Set(Some(notes));
        }
        if let Some(reviewer) = review.reviewed_by {
            model.reviewed_by = Set(Some(reviewer));
        }
        model.status = Set(GradeStatus::Reviewed.to_string());
        model.reviewed_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("更新评分失败: {e}")))?;

        Ok(Some(result.into_grade()))
    }

    pub async fn publish_grade_impl(&self, id: i64) -> Result<Option<Grade>> {
        let existing = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询评分失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(GradeStatus::Published.to_string());
        model.published_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("发布评分失败: {e}")))?;

        Ok(Some(result.into_grade()))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::feedback::entities::CriterionFeedback;
    use crate::models::grades::{
        entities::{CriterionScores, GradeStatus},
        requests::{GradeListParams, NewAutoGrade, ReviewGradeRequest},
    };
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    fn auto_grade(submission_id: i64) -> NewAutoGrade {
        NewAutoGrade {
            submission_id,
            student_id: "EST001".to_string(),
            scores: CriterionScores {
                comprehension: 4.0,
                design: 3.5,
                implementation: 3.0,
                functionality: 4.5,
            },
            feedback: CriterionFeedback {
                comprehension: "Clear".to_string(),
                design: "Decent".to_string(),
                implementation: "Ok".to_string(),
                functionality: "Works".to_string(),
            },
            general_comments: "Evaluated automatically by AI".to_string(),
        }
    }

    #[tokio::test]
    async fn test_auto_grade_writes_grade_and_feedback() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let submission = fixtures::submission(&storage, assignment.id, "EST001").await;

        let (grade, feedback) = storage
            .create_auto_grade(auto_grade(submission.id))
            .await
            .unwrap();

        assert_eq!(grade.status, GradeStatus::AutoGraded);
        assert_eq!(grade.ai_total_score, Some(15.0));
        assert_eq!(grade.student_id.as_deref(), Some("EST001"));
        assert!(grade.final_total_score.is_none());
        assert_eq!(feedback.grade_id, grade.id);
        assert_eq!(feedback.design_comments.as_deref(), Some("Decent"));

        // 提交状态随评分一起提交
        let stored = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, SubmissionStatus::Evaluated);

        let listed = storage
            .list_grades_with_pagination(GradeListParams {
                submission_id: Some(submission.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].feedback.as_ref().unwrap().id, feedback.id);
    }

    #[tokio::test]
    async fn test_auto_grade_for_missing_submission_leaves_nothing() {
        let storage = SeaOrmStorage::in_memory().await;
        fixtures::assignment(&storage).await;

        assert!(storage.create_auto_grade(auto_grade(777)).await.is_err());
        let listed = storage
            .list_grades_with_pagination(GradeListParams::default())
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_review_then_publish() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let submission = fixtures::submission(&storage, assignment.id, "EST001").await;
        let (grade, _) = storage
            .create_auto_grade(auto_grade(submission.id))
            .await
            .unwrap();

        // 只给出部分分数时不计算总分
        let partial = storage
            .review_grade(
                grade.id,
                ReviewGradeRequest {
                    final_comprehension_score: Some(5.0),
                    final_design_score: Some(4.0),
                    instructor_notes: Some("Good work".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(partial.status, GradeStatus::Reviewed);
        assert!(partial.reviewed_at.is_some());
        assert!(partial.final_total_score.is_none());

        let complete = storage
            .review_grade(
                grade.id,
                ReviewGradeRequest {
                    final_implementation_score: Some(3.25),
                    final_functionality_score: Some(4.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(complete.final_comprehension_score, Some(5.0));
        assert_eq!(complete.final_total_score, Some(16.75));
        assert_eq!(complete.instructor_notes.as_deref(), Some("Good work"));

        let published = storage.publish_grade(grade.id).await.unwrap().unwrap();
        assert_eq!(published.status, GradeStatus::Published);
        assert!(published.published_at.is_some());

        assert!(storage.publish_grade(9999).await.unwrap().is_none());
    }
}

//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{CodeMentorError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Assignment, default_rubric},
        requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    submissions::entities::SubmissionStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// 四项默认满分之和
const DEFAULT_MAX_SCORE: f64 = 100.0;

impl SeaOrmStorage {
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let rubric = serde_json::to_string(&req.rubric.unwrap_or_else(default_rubric))?;

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            max_score: Set(req.max_score.unwrap_or(DEFAULT_MAX_SCORE)),
            requirements: Set(req.requirements),
            rubric: Set(rubric),
            section_id: Set(req.section_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_with_pagination_impl(
        &self,
        params: AssignmentListParams,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = params.pagination().normalized();

        let mut select = Assignments::find();

        if let Some(ref section_id) = params.section_id {
            select = select.filter(Column::SectionId.eq(section_id.as_str()));
        }

        // 按标题搜索
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询作业页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询作业列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_assignment())
            .collect();

        Ok(AssignmentListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询作业失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(requirements) = update.requirements {
            model.requirements = Set(Some(requirements));
        }
        if let Some(rubric) = update.rubric {
            model.rubric = Set(serde_json::to_string(&rubric)?);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(result.into_assignment()))
    }

    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_assignment_submissions_impl(&self, assignment_id: i64) -> Result<u64> {
        Submissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .filter(SubmissionColumn::Status.ne(SubmissionStatus::Deleted.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("统计提交失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::assignments::{
        entities::{CRITERIA, DEFAULT_CRITERION_MAX, RubricCriterion},
        requests::{AssignmentListParams, UpdateAssignmentRequest},
    };
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    #[tokio::test]
    async fn test_assignment_gets_default_rubric() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;

        assert_eq!(assignment.max_score, 100.0);
        assert_eq!(assignment.rubric.len(), 4);
        for criterion in CRITERIA {
            assert_eq!(assignment.rubric[criterion].max_score, DEFAULT_CRITERION_MAX);
        }

        let loaded = storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.rubric, assignment.rubric);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;

        let mut rubric = assignment.rubric.clone();
        rubric.insert(
            "design".to_string(),
            RubricCriterion {
                max_score: 10.0,
                criteria: "Classes".to_string(),
                weight: None,
            },
        );

        let updated = storage
            .update_assignment(
                assignment.id,
                UpdateAssignmentRequest {
                    title: Some("Bank account v2".to_string()),
                    rubric: Some(rubric),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Bank account v2");
        assert_eq!(updated.requirements, assignment.requirements);
        assert_eq!(updated.rubric["design"].max_score, 10.0);

        let missing = storage
            .update_assignment(999, UpdateAssignmentRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_search_and_submission_count() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;

        let found = storage
            .list_assignments_with_pagination(AssignmentListParams {
                search: Some("bank".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);

        let none = storage
            .list_assignments_with_pagination(AssignmentListParams {
                section_id: Some("SEC999".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.items.is_empty());

        assert_eq!(
            storage
                .count_assignment_submissions(assignment.id)
                .await
                .unwrap(),
            0
        );
        let submission = fixtures::submission(&storage, assignment.id, "EST001").await;
        assert_eq!(
            storage
                .count_assignment_submissions(assignment.id)
                .await
                .unwrap(),
            1
        );

        // 软删除的提交不计入
        storage
            .update_submission_status(submission.id, SubmissionStatus::Deleted)
            .await
            .unwrap();
        assert_eq!(
            storage
                .count_assignment_submissions(assignment.id)
                .await
                .unwrap(),
            0
        );
        assert!(storage.delete_assignment(assignment.id).await.unwrap());
        assert!(!storage.delete_assignment(assignment.id).await.unwrap());
    }
}

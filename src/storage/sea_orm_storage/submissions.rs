//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{CodeMentorError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{NewSubmission, SubmissionListParams},
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_submission_impl(&self, submission: NewSubmission) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(submission.assignment_id),
            section_id: Set(submission.section_id),
            group_number: Set(submission.group_number),
            submitted_by: Set(submission.submitted_by),
            project_path: Set(None),
            video_path: Set(None),
            status: Set(SubmissionStatus::Uploaded.to_string()),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_submissions_with_pagination_impl(
        &self,
        params: SubmissionListParams,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = params.pagination().normalized();

        let mut select = Submissions::find();

        if let Some(assignment_id) = params.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(ref section_id) = params.section_id {
            select = select.filter(Column::SectionId.eq(section_id.as_str()));
        }
        // 未指定状态时隐藏已删除的提交
        select = match params.status {
            Some(status) => select.filter(Column::Status.eq(status.as_str())),
            None => select.filter(Column::Status.ne(SubmissionStatus::Deleted.as_str())),
        };

        let paginator = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询提交页数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询提交列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_submission())
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn list_assignment_submissions_impl(
        &self,
        assignment_id: i64,
        only_ids: Option<Vec<i64>>,
    ) -> Result<Vec<Submission>> {
        let mut select = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::Status.ne(SubmissionStatus::Deleted.as_str()));

        if let Some(ids) = only_ids {
            select = select.filter(Column::Id.is_in(ids));
        }

        let rows = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询作业提交失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    pub async fn set_submission_paths_impl(
        &self,
        id: i64,
        project_path: Option<String>,
        video_path: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if project_path.is_some() {
            model.project_path = Set(project_path);
        }
        if video_path.is_some() {
            model.video_path = Set(video_path);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("更新提交路径失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    pub async fn update_submission_status_impl(
        &self,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(Column::Status, sea_orm::sea_query::Expr::value(status.as_str()))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("更新提交状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove_submission_impl(&self, id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::submissions::{
        entities::SubmissionStatus, requests::NewSubmission, requests::SubmissionListParams,
    };
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    #[tokio::test]
    async fn test_new_submission_is_uploaded_without_paths() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let submission = fixtures::submission(&storage, assignment.id, "EST001").await;

        assert_eq!(submission.status, SubmissionStatus::Uploaded);
        assert!(submission.project_path.is_none());
        assert!(submission.video_path.is_none());

        let updated = storage
            .set_submission_paths(
                submission.id,
                Some("submissions/submissions/1/1_p.zip".to_string()),
                None,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            updated.project_path.as_deref(),
            Some("submissions/submissions/1/1_p.zip")
        );
        assert!(updated.video_path.is_none());
    }

    #[tokio::test]
    async fn test_submission_requires_existing_student() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let result = storage
            .create_submission(NewSubmission {
                assignment_id: assignment.id,
                section_id: "SEC001".to_string(),
                group_number: 1,
                submitted_by: "GHOST".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_hides_deleted_unless_requested() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let first = fixtures::submission(&storage, assignment.id, "EST001").await;
        let second = fixtures::submission(&storage, assignment.id, "EST001").await;

        assert!(
            storage
                .update_submission_status(first.id, SubmissionStatus::Deleted)
                .await
                .unwrap()
        );

        let visible = storage
            .list_submissions_with_pagination(SubmissionListParams {
                assignment_id: Some(assignment.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(visible.items.len(), 1);
        assert_eq!(visible.items[0].id, second.id);

        let deleted = storage
            .list_submissions_with_pagination(SubmissionListParams {
                status: Some(SubmissionStatus::Deleted),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(deleted.items.len(), 1);
        assert_eq!(deleted.items[0].id, first.id);

        let sweep = storage
            .list_assignment_submissions(assignment.id, None)
            .await
            .unwrap();
        assert_eq!(sweep.len(), 1);
    }

    #[tokio::test]
    async fn test_restrict_to_ids_and_remove() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let a = fixtures::submission(&storage, assignment.id, "EST001").await;
        let b = fixtures::submission(&storage, assignment.id, "EST001").await;
        let c = fixtures::submission(&storage, assignment.id, "EST001").await;

        let subset = storage
            .list_assignment_submissions(assignment.id, Some(vec![c.id, a.id]))
            .await
            .unwrap();
        let ids: Vec<i64> = subset.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);

        assert!(storage.remove_submission(b.id).await.unwrap());
        assert!(storage.get_submission_by_id(b.id).await.unwrap().is_none());
    }
}

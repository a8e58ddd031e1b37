//! 查重结果存储操作

use super::SeaOrmStorage;
use crate::entity::plagiarism_detections::{ActiveModel, Column, Entity as Detections};
use crate::errors::{CodeMentorError, Result};
use crate::models::{
    PaginationInfo,
    plagiarism::{
        entities::{PlagiarismDetection, PlagiarismStatus},
        requests::{NewDetection, PlagiarismListParams},
        responses::PlagiarismListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 写入一批查重结果
    ///
    /// 同一对提交已有记录时原地更新相似度；教师已复核的结论保持不变。
    pub async fn save_detections_impl(
        &self,
        detections: Vec<NewDetection>,
    ) -> Result<Vec<PlagiarismDetection>> {
        if detections.is_empty() {
            return Ok(Vec::new());
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(detections.len());
        for detection in detections {
            // 较小的 ID 总在前
            let (first, second) = if detection.submission_id_1 <= detection.submission_id_2 {
                (detection.submission_id_1, detection.submission_id_2)
            } else {
                (detection.submission_id_2, detection.submission_id_1)
            };

            let existing = Detections::find()
                .filter(Column::SubmissionId1.eq(first))
                .filter(Column::SubmissionId2.eq(second))
                .one(&txn)
                .await
                .map_err(|e| {
                    CodeMentorError::database_operation(format!("查询已有查重结果失败: {e}"))
                })?;

            let row = match existing {
                Some(existing) => {
                    let reviewed = existing
                        .status
                        .parse::<PlagiarismStatus>()
                        .is_ok_and(|s| s.is_reviewed());
                    let mut model: ActiveModel = existing.into();
                    model.assignment_id = Set(detection.assignment_id);
                    model.similarity_score = Set(detection.similarity_score);
                    model.semantic_similarity = Set(Some(detection.semantic_similarity));
                    model.structural_similarity = Set(Some(detection.structural_similarity));
                    model.detected_at = Set(now);
                    if !reviewed {
                        model.status = Set(detection.status.to_string());
                    }
                    model.update(&txn).await.map_err(|e| {
                        CodeMentorError::database_operation(format!("更新查重结果失败: {e}"))
                    })?
                }
                None => ActiveModel {
                    assignment_id: Set(detection.assignment_id),
                    submission_id_1: Set(first),
                    submission_id_2: Set(second),
                    similarity_score: Set(detection.similarity_score),
                    semantic_similarity: Set(Some(detection.semantic_similarity)),
                    structural_similarity: Set(Some(detection.structural_similarity)),
                    status: Set(detection.status.to_string()),
                    reviewed_by: Set(None),
                    detected_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    CodeMentorError::database_operation(format!("写入查重结果失败: {e}"))
                })?,
            };

            saved.push(row.into_detection());
        }

        txn.commit()
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    pub async fn get_detection_by_id_impl(&self, id: i64) -> Result<Option<PlagiarismDetection>> {
        let result = Detections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询查重结果失败: {e}")))?;

        Ok(result.map(|m| m.into_detection()))
    }

    pub async fn list_detections_with_pagination_impl(
        &self,
        params: PlagiarismListParams,
    ) -> Result<PlagiarismListResponse> {
        let (page, size) = params.pagination().normalized();

        let mut select = Detections::find();

        if let Some(assignment_id) = params.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(min) = params.min_similarity {
            select = select.filter(Column::SimilarityScore.gte(min));
        }

        let paginator = select
            .order_by_desc(Column::SimilarityScore)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            CodeMentorError::database_operation(format!("查询查重结果总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            CodeMentorError::database_operation(format!("查询查重结果页数失败: {e}"))
        })?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| {
                CodeMentorError::database_operation(format!("查询查重结果列表失败: {e}"))
            })?
            .into_iter()
            .map(|m| m.into_detection())
            .collect();

        Ok(PlagiarismListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn review_detection_impl(
        &self,
        id: i64,
        status: PlagiarismStatus,
        reviewed_by: Option<i64>,
    ) -> Result<Option<PlagiarismDetection>> {
        let existing = Detections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("查询查重结果失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.to_string());
        if reviewed_by.is_some() {
            model.reviewed_by = Set(reviewed_by);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CodeMentorError::database_operation(format!("更新查重结果失败: {e}")))?;

        Ok(Some(result.into_detection()))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::plagiarism::{
        entities::PlagiarismStatus,
        requests::{NewDetection, PlagiarismListParams},
    };
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    fn detection(assignment_id: i64, a: i64, b: i64, score: f64) -> NewDetection {
        NewDetection {
            assignment_id,
            submission_id_1: a,
            submission_id_2: b,
            similarity_score: score,
            semantic_similarity: score,
            structural_similarity: 40.0,
            status: if score > 95.0 {
                PlagiarismStatus::Suspicious
            } else {
                PlagiarismStatus::ReviewNeeded
            },
        }
    }

    #[tokio::test]
    async fn test_rerun_updates_same_pair() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let a = fixtures::submission(&storage, assignment.id, "EST001").await;
        let b = fixtures::submission(&storage, assignment.id, "EST001").await;

        let first = storage
            .save_detections(vec![detection(assignment.id, a.id, b.id, 90.0)])
            .await
            .unwrap();
        assert_eq!(first[0].status, PlagiarismStatus::ReviewNeeded);

        // 顺序颠倒的同一对提交也会更新原记录
        let second = storage
            .save_detections(vec![detection(assignment.id, b.id, a.id, 97.5)])
            .await
            .unwrap();
        assert_eq!(second[0].id, first[0].id);
        assert_eq!(second[0].submission_id_1, a.id);
        assert_eq!(second[0].submission_id_2, b.id);

        let all = storage
            .list_detections_with_pagination(PlagiarismListParams {
                assignment_id: Some(assignment.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 1);
        assert_eq!(all.items[0].similarity_score, 97.5);
        assert_eq!(all.items[0].status, PlagiarismStatus::Suspicious);
    }

    #[tokio::test]
    async fn test_rerun_keeps_instructor_review() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let reviewer = storage
            .get_section_by_id("SEC001")
            .await
            .unwrap()
            .unwrap()
            .instructor_id;
        let a = fixtures::submission(&storage, assignment.id, "EST001").await;
        let b = fixtures::submission(&storage, assignment.id, "EST001").await;

        let first = storage
            .save_detections(vec![detection(assignment.id, a.id, b.id, 90.0)])
            .await
            .unwrap();
        storage
            .review_detection(first[0].id, PlagiarismStatus::Confirmed, Some(reviewer))
            .await
            .unwrap()
            .unwrap();

        let again = storage
            .save_detections(vec![detection(assignment.id, a.id, b.id, 97.0)])
            .await
            .unwrap();
        assert_eq!(again[0].id, first[0].id);
        assert_eq!(again[0].status, PlagiarismStatus::Confirmed);
        assert_eq!(again[0].reviewed_by, Some(reviewer));
        assert_eq!(again[0].similarity_score, 97.0);
    }

    #[tokio::test]
    async fn test_filters_and_review() {
        let storage = SeaOrmStorage::in_memory().await;
        let assignment = fixtures::assignment(&storage).await;
        let a = fixtures::submission(&storage, assignment.id, "EST001").await;
        let b = fixtures::submission(&storage, assignment.id, "EST001").await;
        let c = fixtures::submission(&storage, assignment.id, "EST001").await;

        let saved = storage
            .save_detections(vec![
                detection(assignment.id, a.id, b.id, 86.0),
                detection(assignment.id, a.id, c.id, 99.0),
            ])
            .await
            .unwrap();

        let high = storage
            .list_detections_with_pagination(PlagiarismListParams {
                min_similarity: Some(90.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(high.items.len(), 1);
        assert_eq!(high.items[0].submission_id_2, c.id);

        let reviewed = storage
            .review_detection(saved[0].id, PlagiarismStatus::Dismissed, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.status, PlagiarismStatus::Dismissed);

        let dismissed = storage
            .list_detections_with_pagination(PlagiarismListParams {
                status: Some(PlagiarismStatus::Dismissed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(dismissed.items.len(), 1);

        assert!(
            storage
                .review_detection(12345, PlagiarismStatus::Confirmed, None)
                .await
                .unwrap()
                .is_none()
        );
    }
}

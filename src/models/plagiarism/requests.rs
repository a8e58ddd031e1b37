use serde::Deserialize;
use ts_rs::TS;

use super::entities::PlagiarismStatus;
use crate::models::PaginationQuery;

/// 发起查重请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub struct DetectPlagiarismRequest {
    pub assignment_id: i64,
    /// 仅比较这些提交（可选）
    pub submission_ids: Option<Vec<i64>>,
}

/// 查重结果列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub struct PlagiarismListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub status: Option<PlagiarismStatus>,
    pub min_similarity: Option<f64>,
}

impl PlagiarismListParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.size)
    }
}

/// 教师复核查重结果
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub struct ReviewPlagiarismRequest {
    pub status: PlagiarismStatus,
    pub reviewed_by: Option<i64>,
}

/// 待写入的查重结果
#[derive(Debug, Clone, PartialEq)]
pub struct NewDetection {
    pub assignment_id: i64,
    pub submission_id_1: i64,
    pub submission_id_2: i64,
    pub similarity_score: f64,
    pub semantic_similarity: f64,
    pub structural_similarity: f64,
    pub status: PlagiarismStatus,
}

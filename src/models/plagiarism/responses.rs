use serde::Serialize;
use ts_rs::TS;

use super::entities::PlagiarismDetection;
use crate::models::PaginationInfo;

/// 被跳过的提交及原因
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub struct SkippedSubmission {
    pub submission_id: i64,
    pub reason: String,
}

/// 一次查重的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub struct DetectionResponse {
    pub assignment_id: i64,
    // 实际参与比较的提交数
    pub compared: usize,
    pub skipped: Vec<SkippedSubmission>,
    pub detections_found: usize,
    pub detections: Vec<PlagiarismDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub struct PlagiarismListResponse {
    pub items: Vec<PlagiarismDetection>,
    pub pagination: PaginationInfo,
}

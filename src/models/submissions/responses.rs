use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;
use crate::models::PaginationInfo;
use crate::models::evaluation::entities::EvaluationLog;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub pagination: PaginationInfo,
}

/// 预签名下载链接
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct DownloadUrlResponse {
    pub download_url: String,
    // 有效期（秒）
    pub expires_in: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionLogsResponse {
    pub submission_id: i64,
    pub items: Vec<EvaluationLog>,
}

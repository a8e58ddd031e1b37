use serde::Serialize;
use ts_rs::TS;

use super::entities::Grade;
use crate::models::PaginationInfo;
use crate::models::feedback::entities::Feedback;

/// 评分及其反馈
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeWithFeedback {
    #[serde(flatten)]
    #[ts(flatten)]
    pub grade: Grade,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeWithFeedback>,
    pub pagination: PaginationInfo,
}

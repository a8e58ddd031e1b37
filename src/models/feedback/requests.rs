use serde::Deserialize;
use ts_rs::TS;

/// 反馈查询参数，grade_id 与 submission_id 至少提供一个
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackListParams {
    pub grade_id: Option<i64>,
    pub submission_id: Option<i64>,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 四项维度的文字反馈
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct CriterionFeedback {
    pub comprehension: String,
    pub design: String,
    pub implementation: String,
    pub functionality: String,
}

// 反馈记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct Feedback {
    pub id: i64,
    pub grade_id: i64,
    pub submission_id: i64,
    pub comprehension_comments: Option<String>,
    pub design_comments: Option<String>,
    pub implementation_comments: Option<String>,
    pub functionality_comments: Option<String>,
    pub general_comments: Option<String>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

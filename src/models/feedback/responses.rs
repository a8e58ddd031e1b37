use serde::Serialize;
use ts_rs::TS;

use super::entities::Feedback;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackListResponse {
    pub items: Vec<Feedback>,
}

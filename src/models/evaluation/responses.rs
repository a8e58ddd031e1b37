use serde::Serialize;
use ts_rs::TS;

use super::entities::ParticipationReport;
use crate::models::feedback::entities::CriterionFeedback;
use crate::models::grades::entities::CriterionScores;

/// 代码评测结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationResponse {
    pub submission_id: i64,
    pub grade_id: i64,
    pub total_score: f64,
    // 已换算为 0–5
    pub scores: CriterionScores,
    pub feedback: CriterionFeedback,
    // 模型调用或解析失败时为 true
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

/// 视频分析结果
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct VideoAnalysisResponse {
    pub submission_id: i64,
    pub transcription: Option<String>,
    pub analysis: Option<String>,
    pub participation: Option<ParticipationReport>,
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评测流水日志
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationLog {
    pub id: i64,
    pub submission_id: Option<i64>,
    // 例如 evaluation / code_extraction / llm / video_analysis
    pub step: String,
    // started / completed / failed / warning
    pub status: String,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 单个发言人的参与时长
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SpeakerTime {
    pub speaker_id: usize,
    pub time: f64,
    pub percentage: f64,
}

/// 视频参与度分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ParticipationReport {
    pub total_duration: f64,
    pub num_speakers_detected: usize,
    pub speaker_times: Vec<SpeakerTime>,
}

/// 历史评分样例统计
#[derive(Debug, Clone, PartialEq, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ReferenceStats {
    pub total: usize,
    pub loaded: bool,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

/// 评分状态：auto_graded → reviewed → published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum GradeStatus {
    AutoGraded,
    Reviewed,
    Published,
}

string_enum!(GradeStatus, "评分状态" {
    AutoGraded => "auto_graded",
    Reviewed => "reviewed",
    Published => "published",
});

/// 四项维度得分（0–5）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CriterionScores {
    pub comprehension: f64,
    pub design: f64,
    pub implementation: f64,
    pub functionality: f64,
}

impl CriterionScores {
    /// 总分，保留两位小数
    pub fn total(&self) -> f64 {
        let sum = self.comprehension + self.design + self.implementation + self.functionality;
        (sum * 100.0).round() / 100.0
    }
}

// 评分记录
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub submission_id: i64,
    pub student_id: Option<String>,
    pub ai_comprehension_score: Option<f64>,
    pub ai_design_score: Option<f64>,
    pub ai_implementation_score: Option<f64>,
    pub ai_functionality_score: Option<f64>,
    pub ai_total_score: Option<f64>,
    pub final_comprehension_score: Option<f64>,
    pub final_design_score: Option<f64>,
    pub final_implementation_score: Option<f64>,
    pub final_functionality_score: Option<f64>,
    pub final_total_score: Option<f64>,
    pub participation_percentage: Option<f64>,
    pub adjusted_final_score: Option<f64>,
    pub status: GradeStatus,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub instructor_notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
}

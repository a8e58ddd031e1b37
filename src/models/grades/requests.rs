use serde::Deserialize;
use ts_rs::TS;

use super::entities::{CriterionScores, GradeStatus};
use crate::models::PaginationQuery;
use crate::models::feedback::entities::CriterionFeedback;

/// 评分列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub submission_id: Option<i64>,
    pub student_id: Option<String>,
    pub status: Option<GradeStatus>,
}

impl GradeListParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.size)
    }
}

/// 教师复核请求，分数范围 0–5
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReviewGradeRequest {
    pub final_comprehension_score: Option<f64>,
    pub final_design_score: Option<f64>,
    pub final_implementation_score: Option<f64>,
    pub final_functionality_score: Option<f64>,
    pub instructor_notes: Option<String>,
    pub reviewed_by: Option<i64>,
}

impl ReviewGradeRequest {
    /// 所有已提供的分数
    pub fn provided_scores(&self) -> Vec<(&'static str, f64)> {
        [
            ("final_comprehension_score", self.final_comprehension_score),
            ("final_design_score", self.final_design_score),
            ("final_implementation_score", self.final_implementation_score),
            ("final_functionality_score", self.final_functionality_score),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, v)))
        .collect()
    }
}

/// 自动评分结果（写入评分与反馈）
#[derive(Debug, Clone)]
pub struct NewAutoGrade {
    pub submission_id: i64,
    pub student_id: String,
    pub scores: CriterionScores,
    pub feedback: CriterionFeedback,
    pub general_comments: String,
}

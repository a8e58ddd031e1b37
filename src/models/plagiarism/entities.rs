use serde::Serialize;
use ts_rs::TS;

use crate::string_enum;

/// 查重结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub enum PlagiarismStatus {
    // 待复核
    ReviewNeeded,
    // 高度可疑（相似度 > 0.95）
    Suspicious,
    // 教师确认抄袭
    Confirmed,
    // 教师排除
    Dismissed,
}

string_enum!(PlagiarismStatus, "查重状态" {
    ReviewNeeded => "review_needed",
    Suspicious => "suspicious",
    Confirmed => "confirmed",
    Dismissed => "dismissed",
});

impl PlagiarismStatus {
    /// 教师已给出结论
    pub fn is_reviewed(&self) -> bool {
        matches!(self, PlagiarismStatus::Confirmed | PlagiarismStatus::Dismissed)
    }
}

// 查重结果（一对提交）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/plagiarism.ts")]
pub struct PlagiarismDetection {
    pub id: i64,
    pub assignment_id: i64,
    // 始终满足 submission_id_1 < submission_id_2
    pub submission_id_1: i64,
    pub submission_id_2: i64,
    // 百分比 0–100
    pub similarity_score: f64,
    pub semantic_similarity: Option<f64>,
    pub structural_similarity: Option<f64>,
    pub status: PlagiarismStatus,
    pub reviewed_by: Option<i64>,
    pub detected_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewed_statuses() {
        assert!(PlagiarismStatus::Confirmed.is_reviewed());
        assert!(PlagiarismStatus::Dismissed.is_reviewed());
        assert!(!PlagiarismStatus::Suspicious.is_reviewed());
        assert!(!PlagiarismStatus::ReviewNeeded.is_reviewed());
    }
}

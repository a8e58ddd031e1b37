use serde::Serialize;
use ts_rs::TS;

use crate::string_enum;

/// 提交状态：uploaded → evaluating → evaluated，另有 failed / deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Uploaded,
    Evaluating,
    Evaluated,
    Failed,
    Deleted,
}

string_enum!(SubmissionStatus, "提交状态" {
    Uploaded => "uploaded",
    Evaluating => "evaluating",
    Evaluated => "evaluated",
    Failed => "failed",
    Deleted => "deleted",
});

// 小组提交
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub section_id: String,
    pub group_number: i32,
    // 提交人学号
    pub submitted_by: String,
    // 代码压缩包位置 `bucket/key`
    pub project_path: Option<String>,
    // 视频位置 `bucket/key`
    pub video_path: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_text() {
        for s in ["uploaded", "evaluating", "evaluated", "failed", "deleted"] {
            let status: SubmissionStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
        assert!("graded".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_status_deserialize_error_message() {
        let err = serde_json::from_str::<SubmissionStatus>("\"nope\"").unwrap_err();
        assert!(err.to_string().contains("uploaded"));
    }
}

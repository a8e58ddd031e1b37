use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;
use crate::models::PaginationQuery;

/// 提交列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub section_id: Option<String>,
    pub status: Option<SubmissionStatus>,
}

impl SubmissionListParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.size)
    }
}

/// 新建提交记录（由 multipart 表单解析得到）
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assignment_id: i64,
    pub section_id: String,
    pub group_number: i32,
    pub submitted_by: String,
}

use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;

/// 创建教师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct CreateInstructorRequest {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

/// 教师列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct InstructorListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

impl InstructorListParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.size)
    }
}

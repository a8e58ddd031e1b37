use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;

/// 创建教学班请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct CreateSectionRequest {
    pub section_id: String,
    pub section_code: String,
    pub semester: String,
    pub year: i32,
    pub instructor_id: i64,
}

/// 教学班列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct SectionListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub instructor_id: Option<i64>,
    pub semester: Option<String>,
    pub year: Option<i32>,
}

impl SectionListParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.size)
    }
}

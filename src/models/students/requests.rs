use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;

/// 创建学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub section_id: String,
    pub group_number: i32,
}

/// 学生列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub section_id: Option<String>,
    pub group_number: Option<i32>,
}

impl StudentListParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.size)
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    // 学号，例如 EST001
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub section_id: String,
    // 小组编号
    pub group_number: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教学班
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct Section {
    // 教学班编号，例如 SEC001
    pub section_id: String,
    pub section_code: String,
    pub semester: String,
    pub year: i32,
    pub instructor_id: i64,
}

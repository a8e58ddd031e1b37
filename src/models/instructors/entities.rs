use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct Instructor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

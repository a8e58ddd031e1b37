use serde::Serialize;
use ts_rs::TS;

use super::entities::Instructor;
use crate::models::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct InstructorListResponse {
    pub items: Vec<Instructor>,
    pub pagination: PaginationInfo,
}

use serde::Serialize;
use ts_rs::TS;

use super::entities::Section;
use crate::models::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct SectionListResponse {
    pub items: Vec<Section>,
    pub pagination: PaginationInfo,
}

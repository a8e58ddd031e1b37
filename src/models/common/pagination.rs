use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 分页参数（存储层使用）
#[derive(Debug, Clone, Copy, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PaginationQuery {
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self { page, size }
    }

    /// 规范化后的 (页码, 每页条数)，页码从 1 开始，每页 1..=100，默认 20
    pub fn normalized(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1) as u64;
        let size = self.size.unwrap_or(20).clamp(1, 100) as u64;
        (page, size)
    }
}

/// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_defaults() {
        assert_eq!(PaginationQuery::default().normalized(), (1, 20));
    }

    #[test]
    fn test_normalized_clamps() {
        let q = PaginationQuery::new(Some(0), Some(500));
        assert_eq!(q.normalized(), (1, 100));
        let q = PaginationQuery::new(Some(3), Some(0));
        assert_eq!(q.normalized(), (3, 1));
    }
}

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::AppConfig;

/// 规整后的分页请求
///
/// 页码从 1 开始，小于等于 0 的页码视为第 1 页；每页条数限制在 `1..=max_limit`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// 使用全局配置中的默认值与上限
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let config = &AppConfig::get().pagination;
        Self::with_bounds(page, limit, config.default_limit, config.max_limit)
    }

    pub fn with_bounds(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: i64,
        max_limit: i64,
    ) -> Self {
        let max_limit = max_limit.max(1);
        let page = page.unwrap_or(1).max(1) as u64;
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit) as u64;
        Self { page, limit }
    }

    /// 跳过的行数
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(request: &PageRequest, total: u64) -> Self {
        Self {
            page: request.page as i64,
            page_size: request.limit as i64,
            total: total as i64,
            total_pages: total.div_ceil(request.limit) as i64,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T: TS> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total: u64) -> Self {
        Self {
            items,
            pagination: PaginationInfo::new(request, total),
        }
    }

    /// 转换列表元素类型，分页信息保持不变
    pub fn map<U: TS>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamped_to_one() {
        let req = PageRequest::with_bounds(Some(0), Some(10), 10, 100);
        assert_eq!(req.page, 1);
        assert_eq!(req.offset(), 0);

        let req = PageRequest::with_bounds(Some(-7), None, 10, 100);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(PageRequest::with_bounds(None, Some(0), 10, 100).limit, 1);
        assert_eq!(PageRequest::with_bounds(None, Some(1000), 10, 100).limit, 100);
        assert_eq!(PageRequest::with_bounds(None, Some(25), 10, 100).limit, 25);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::with_bounds(Some(3), Some(20), 10, 100);
        assert_eq!(req.offset(), 40);

        let req = PageRequest::with_bounds(Some(i64::MAX), Some(100), 10, 100);
        assert_eq!(req.offset(), u64::MAX);
    }

    #[test]
    fn test_total_pages() {
        let req = PageRequest::with_bounds(Some(1), Some(10), 10, 100);
        assert_eq!(PaginationInfo::new(&req, 0).total_pages, 0);
        assert_eq!(PaginationInfo::new(&req, 10).total_pages, 1);
        assert_eq!(PaginationInfo::new(&req, 11).total_pages, 2);
    }
}

use serde::{Deserialize, Serialize};

/// 페이지 정보 (currentPage 는 0부터 시작)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// 목록 응답: content + pageInfo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            page_info: PageInfo::default(),
        }
    }
}

impl PageInfo {
    /// "시작-끝" 표기, 끝은 전체 건수를 넘지 않음
    pub fn range_text(&self) -> String {
        if self.total_elements == 0 || self.size == 0 {
            return "0-0".to_string();
        }
        let size = u64::from(self.size);
        let page = u64::from(self.current_page);
        let start = page * size + 1;
        if start > self.total_elements {
            return "0-0".to_string();
        }
        let end = ((page + 1) * size).min(self.total_elements);
        format!("{start}-{end}")
    }

    /// 화면에 보일 페이지 번호 (0부터), 현재 페이지를 가운데에 두고 범위 안으로 조정
    pub fn page_window(&self, width: u32) -> Vec<u32> {
        if self.total_pages == 0 || width == 0 {
            return Vec::new();
        }
        let width = width.min(self.total_pages);
        let current = self.current_page.min(self.total_pages - 1);
        let start = current
            .saturating_sub(width / 2)
            .min(self.total_pages - width);
        (start..start + width).collect()
    }
}

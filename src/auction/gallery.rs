use std::ops::Range;

/// 썸네일 슬라이드 창 (이미지 배열 위의 인덱스 범위)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryWindow {
    len: usize,
    width: usize,
    start: usize,
    selected: usize,
}

impl GalleryWindow {
    pub fn new(len: usize, width: usize) -> Self {
        Self {
            len,
            width: width.max(1),
            start: 0,
            selected: 0,
        }
    }

    pub fn visible(&self) -> Range<usize> {
        self.start..(self.start + self.width).min(self.len)
    }

    pub fn selected(&self) -> Option<usize> {
        (self.len > 0).then_some(self.selected)
    }

    fn max_start(&self) -> usize {
        self.len.saturating_sub(self.width)
    }

    pub fn can_slide_prev(&self) -> bool {
        self.start > 0
    }

    pub fn can_slide_next(&self) -> bool {
        self.start < self.max_start()
    }

    pub fn slide_next(&mut self) {
        self.start = (self.start + 1).min(self.max_start());
    }

    pub fn slide_prev(&mut self) {
        self.start = self.start.saturating_sub(1);
    }

    /// 이미지 선택, 선택된 이미지가 보이도록 창 이동
    pub fn select(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.selected = index.min(self.len - 1);
        if self.selected < self.start {
            self.start = self.selected;
        } else if self.selected >= self.start + self.width {
            self.start = self.selected + 1 - self.width;
        }
    }
}

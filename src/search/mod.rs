/// 검색어 자동완성
/// 입력이 멈춘 뒤(디바운스) 마지막 입력만 조회한다.
// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{sleep, Duration};
use tracing::debug;

// endregion: --- Imports

// region:    --- Debouncer
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// 대기 후에도 가장 최근 호출이면 true
    pub async fn settle(&self) -> bool {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == mine
    }

    /// 대기 중인 호출 모두 무효화
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
// endregion: --- Debouncer

// region:    --- Autocomplete
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularKeyword {
    pub rank: u32,
    pub keyword: String,
}

pub struct Autocomplete {
    api: ApiClient,
    debouncer: Debouncer,
}

impl Autocomplete {
    pub fn new(api: ApiClient) -> Self {
        let delay = api.config().autocomplete_debounce;
        Self {
            api,
            debouncer: Debouncer::new(delay),
        }
    }

    /// 자동완성 조회
    /// 빈 입력은 요청 없이 빈 목록, 뒤에 들어온 입력에 밀린 요청은 None
    pub async fn suggest(&self, input: &str) -> Result<Option<Vec<String>>, ClientError> {
        let prefix = input.trim();
        if prefix.is_empty() {
            self.debouncer.cancel();
            return Ok(Some(Vec::new()));
        }
        if !self.debouncer.settle().await {
            debug!("{:<12} --> 디바운스로 취소: {}", "Search", prefix);
            return Ok(None);
        }
        let keywords: Vec<String> = self
            .api
            .get_json(
                routes::SEARCH_AUTOCOMPLETE,
                &[("keyword", prefix.to_string())],
            )
            .await?
            .body;
        Ok(Some(keywords))
    }

    pub async fn popular(&self) -> Result<Vec<PopularKeyword>, ClientError> {
        let mut keywords: Vec<PopularKeyword> =
            self.api.get_json(routes::SEARCH_POPULAR, &[]).await?.body;
        keywords.sort_by_key(|k| k.rank);
        Ok(keywords)
    }
}
// endregion: --- Autocomplete

// region:    --- Keyboard Navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// 자동완성 목록 위의 키보드 선택 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<String>,
    selected: Option<usize>,
}

impl SuggestionList {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|i| self.items[i].as_str())
    }

    /// 키 입력 처리, Enter 면 검색할 단어 반환 (선택 없으면 입력값)
    pub fn handle_key(&mut self, key: NavKey, typed: &str) -> Option<String> {
        let len = self.items.len();
        match key {
            NavKey::Down if len > 0 => {
                self.selected = Some(self.selected.map_or(0, |i| (i + 1) % len));
                None
            }
            NavKey::Up if len > 0 => {
                self.selected = Some(self.selected.map_or(len - 1, |i| (i + len - 1) % len));
                None
            }
            NavKey::Escape => {
                self.selected = None;
                None
            }
            NavKey::Enter => {
                let term = self
                    .selected()
                    .map(str::to_string)
                    .unwrap_or_else(|| typed.trim().to_string());
                (!term.is_empty()).then_some(term)
            }
            _ => None,
        }
    }
}
// endregion: --- Keyboard Navigation

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_latest_input_survives_debounce() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let (first, second) = tokio::join!(debouncer.settle(), async {
            sleep(Duration::from_millis(100)).await;
            debouncer.settle().await
        });
        assert!(!first);
        assert!(second);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_invalidates_pending_call() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let (pending, _) = tokio::join!(debouncer.settle(), async {
            sleep(Duration::from_millis(50)).await;
            debouncer.cancel();
        });
        assert!(!pending);
    }

    #[test]
    fn arrow_keys_wrap_around() {
        let mut list = SuggestionList::new(vec!["카메라".into(), "캠핑".into(), "캐논".into()]);
        list.handle_key(NavKey::Up, "");
        assert_eq!(list.selected(), Some("캐논"));
        list.handle_key(NavKey::Down, "");
        assert_eq!(list.selected(), Some("카메라"));
        list.handle_key(NavKey::Down, "");
        assert_eq!(list.handle_key(NavKey::Enter, "카"), Some("캠핑".to_string()));
    }

    #[test]
    fn enter_without_selection_uses_typed_text() {
        let mut list = SuggestionList::new(vec!["카메라".into()]);
        list.handle_key(NavKey::Down, "");
        list.handle_key(NavKey::Escape, "");
        assert_eq!(list.handle_key(NavKey::Enter, " 렌즈 "), Some("렌즈".to_string()));
        assert_eq!(list.handle_key(NavKey::Enter, "  "), None);

        let mut empty = SuggestionList::default();
        assert_eq!(empty.handle_key(NavKey::Down, ""), None);
        assert_eq!(empty.selected(), None);
    }
}
// endregion: --- Tests

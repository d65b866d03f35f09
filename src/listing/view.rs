/// 목록 화면 공용 컴포넌트
/// 엔드포인트, 상태 라벨 맵, 빈 목록 문구만 다르고 동작은 같다.
// region:    --- Imports
use super::pagination::Page;
use crate::api::ApiClient;
use crate::notify::{Notice, Notifier};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub style: String,
}

/// 상태 라벨을 가진 목록 항목
pub trait ListRow {
    fn status_key(&self) -> Option<&str>;
}

#[derive(Debug, Clone)]
pub struct ListViewConfig {
    pub endpoint: String,
    /// 로그인 후 돌아올 화면 경로
    pub page_path: String,
    pub page_size: u32,
    pub window: u32,
    pub empty_message: String,
    pub error_message: String,
    pub statuses: HashMap<String, StatusBadge>,
}

impl ListViewConfig {
    pub fn new(endpoint: impl Into<String>, empty_message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_path: "/".to_string(),
            page_size: 10,
            window: 5,
            empty_message: empty_message.into(),
            error_message: "목록을 불러오지 못했습니다.".to_string(),
            statuses: HashMap::new(),
        }
    }

    pub fn page_path(mut self, page_path: impl Into<String>) -> Self {
        self.page_path = page_path.into();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn status(mut self, key: &str, label: &str, style: &str) -> Self {
        self.statuses.insert(
            key.to_string(),
            StatusBadge {
                label: label.to_string(),
                style: style.to_string(),
            },
        );
        self
    }

    fn badge(&self, key: &str) -> StatusBadge {
        self.statuses.get(key).cloned().unwrap_or_else(|| StatusBadge {
            label: key.to_string(),
            style: "badge-default".to_string(),
        })
    }
}
// endregion: --- Config

// region:    --- Render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<T> {
    pub item: T,
    pub badge: Option<StatusBadge>,
}

/// 화면에 그릴 목록 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ListRender<T> {
    pub rows: Vec<RenderedRow<T>>,
    pub range_text: String,
    pub total_elements: u64,
    pub pages: Vec<u32>,
    pub current_page: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub empty_message: Option<String>,
    pub error_message: Option<String>,
}

impl<T> ListRender<T> {
    pub fn failed(message: String) -> Self {
        Self {
            rows: Vec::new(),
            range_text: "0-0".to_string(),
            total_elements: 0,
            pages: Vec::new(),
            current_page: 0,
            has_next: false,
            has_previous: false,
            empty_message: None,
            error_message: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}
// endregion: --- Render

// region:    --- List View
pub struct ListView<T> {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    config: ListViewConfig,
    _row: PhantomData<fn() -> T>,
}

impl<T: ListRow + DeserializeOwned> ListView<T> {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, config: ListViewConfig) -> Self {
        Self {
            api,
            notifier,
            config,
            _row: PhantomData,
        }
    }

    pub fn config(&self) -> &ListViewConfig {
        &self.config
    }

    /// 페이지 조회 후 렌더 모델 생성, 실패 시 에러 상태로 렌더
    pub async fn load(&self, page: u32, filters: &[(&str, String)]) -> ListRender<T> {
        info!(
            "{:<12} --> 목록 조회 {} page: {}",
            "ListView", self.config.endpoint, page
        );
        let mut params = vec![
            ("page", page.to_string()),
            ("size", self.config.page_size.to_string()),
        ];
        params.extend(filters.iter().cloned());

        match self
            .api
            .get_json::<Page<T>>(&self.config.endpoint, &params)
            .await
        {
            Ok(fetched) => self.render(fetched.body),
            Err(e) => {
                warn!(
                    "{:<12} --> 목록 조회 실패 {}: {}",
                    "ListView", self.config.endpoint, e
                );
                if let crate::error::ClientError::Unauthorized = e {
                    self.notifier
                        .notify(Notice::from_error(&e, &self.config.page_path));
                }
                ListRender::failed(self.config.error_message.clone())
            }
        }
    }

    pub fn render(&self, page: Page<T>) -> ListRender<T> {
        let info = page.page_info;
        let empty_message = page
            .content
            .is_empty()
            .then(|| self.config.empty_message.clone());
        let rows = page
            .content
            .into_iter()
            .map(|item| {
                let badge = item.status_key().map(|key| self.config.badge(key));
                RenderedRow { item, badge }
            })
            .collect();

        ListRender {
            rows,
            range_text: info.range_text(),
            total_elements: info.total_elements,
            pages: info.page_window(self.config.window),
            current_page: info.current_page,
            has_next: info.has_next,
            has_previous: info.has_previous,
            empty_message,
            error_message: None,
        }
    }
}
// endregion: --- List View

// endregion: --- Tests

// region:    --- Imports
use crate::error::ClientError;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Config
/// 오브젝트 스토리지 설정
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub bucket: String,
    pub api_key: String,
}

/// 클라이언트 설정 (초기화 시 한 번 생성)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// 로그인한 사용자 id (비로그인 시 None)
    pub viewer_id: Option<i64>,
    pub request_timeout: Duration,
    pub countdown_tick: Duration,
    pub autocomplete_debounce: Duration,
    pub login_path: String,
    pub storage: Option<StorageConfig>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            viewer_id: None,
            request_timeout: Duration::from_secs(10),
            countdown_tick: Duration::from_millis(250),
            autocomplete_debounce: Duration::from_millis(300),
            login_path: "/login".to_string(),
            storage: None,
        }
    }

    pub fn with_viewer(mut self, viewer_id: i64) -> Self {
        self.viewer_id = Some(viewer_id);
        self
    }

    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    /// 환경 변수에서 설정 로드
    pub fn load() -> Result<Self, ClientError> {
        let base_url: String = try_load("AUCTION_API_URL", "http://localhost:8080")?;
        let mut config = Self::new(base_url);

        config.viewer_id = match env::var("AUCTION_VIEWER_ID") {
            Ok(raw) => Some(parse("AUCTION_VIEWER_ID", &raw)?),
            Err(_) => {
                info!("{:<12} --> AUCTION_VIEWER_ID 미설정: 비로그인 사용자", "Config");
                None
            }
        };

        let timeout_ms: u64 = try_load("AUCTION_TIMEOUT_MS", "10000")?;
        config.request_timeout = Duration::from_millis(timeout_ms);

        config.storage = match (
            env::var("AUCTION_STORAGE_URL"),
            env::var("AUCTION_STORAGE_KEY"),
        ) {
            (Ok(url), Ok(api_key)) => Some(StorageConfig {
                url: url.trim_end_matches('/').to_string(),
                bucket: try_load("AUCTION_STORAGE_BUCKET", "auction-images")?,
                api_key,
            }),
            _ => None,
        };

        Ok(config)
    }

    /// API 경로를 전체 URL로 변환
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// 로그인 페이지 URL (돌아올 경로 포함)
    pub fn login_url(&self, return_to: &str) -> String {
        format!("{}?redirect={}", self.login_path, return_to)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ClientError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{:<12} --> {key} 미설정, 기본값 사용: {default}", "Config");
        default.to_string()
    });
    parse(key, &raw)
}

fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T, ClientError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("{:<12} --> 잘못된 {key} 값: {e}", "Config");
        ClientError::Config(format!("{key}: {e}"))
    })
}
// endregion: --- Config

// endregion: --- Tests

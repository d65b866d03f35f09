/// REST/JSON 백엔드 클라이언트
/// 1. 요청 전송 및 상태 코드 해석
/// 2. 에러 응답의 message 추출
/// 3. 서버 시각(Date 헤더) 전달
// region:    --- Imports
use crate::config::ClientConfig;
use crate::error::ClientError;
use chrono::{DateTime, Utc};
use reqwest::header::DATE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Modules
pub mod auctions;
pub mod routes;

// endregion: --- Modules

// region:    --- Response
/// 응답 본문과 서버 시각
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub body: T,
    /// HTTP Date 헤더 기준 서버 시각
    pub server_time: Option<DateTime<Utc>>,
}

/// 에러 응답 본문
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP Date 헤더 해석 (예: "Sun, 06 Nov 1994 08:49:37 GMT")
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 상태 코드 검사, 실패 시 message 필드를 담은 에러로 변환
pub(crate) async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = body
        .message
        .or(body.error)
        .filter(|m| !m.trim().is_empty());

    warn!(
        "{:<12} --> 요청 실패: status={}, message={:?}",
        "Api",
        status.as_u16(),
        message
    );
    Err(ClientError::from_status(status.as_u16(), message))
}
// endregion: --- Response

// region:    --- Api Client
/// 마켓플레이스 API 클라이언트
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn viewer_id(&self) -> Option<i64> {
        self.config.viewer_id
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{:<12} --> {} {}", "Api", method, path);
        self.http.request(method, self.config.url(path))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        check_status(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<Fetched<T>, ClientError> {
        let server_time = response
            .headers()
            .get(DATE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_http_date);
        let text = response.text().await?;
        let body = serde_json::from_str(&text)?;
        Ok(Fetched { body, server_time })
    }

    /// GET + JSON 응답
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Fetched<T>, ClientError> {
        let response = self
            .execute(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(response).await
    }

    /// POST + JSON 본문 + JSON 응답
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(Self::decode(response).await?.body)
    }

    /// PUT + JSON 본문 + JSON 응답
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        Ok(Self::decode(response).await?.body)
    }

    /// JSON 본문을 보내고 응답 본문은 무시
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        self.execute(self.request(method, path).json(body)).await?;
        Ok(())
    }

    /// 본문 없는 POST (종료, 확인 등 단발성 액션)
    pub async fn post_empty(&self, path: &str) -> Result<(), ClientError> {
        self.execute(self.request(Method::POST, path)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// 바이너리 다운로드 (PDF 등)
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
// endregion: --- Api Client

// endregion: --- Tests

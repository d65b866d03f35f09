// region:    --- Imports
use crate::api::check_status;
use crate::config::StorageConfig;
use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Object Storage Trait
/// 외부 오브젝트 스토리지
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), ClientError>;
    async fn move_object(&self, from: &str, to: &str) -> Result<(), ClientError>;
    async fn copy_object(&self, from: &str, to: &str) -> Result<(), ClientError>;
    async fn remove(&self, keys: &[String]) -> Result<(), ClientError>;
    fn public_url(&self, key: &str) -> String;
}
// endregion: --- Object Storage Trait

// region:    --- Http Object Storage
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ObjectTransfer<'a> {
    bucket_id: &'a str,
    source_key: &'a str,
    destination_key: &'a str,
}

#[derive(Debug, Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

/// REST 오브젝트 스토리지 클라이언트
#[derive(Debug, Clone)]
pub struct HttpObjectStorage {
    http: reqwest::Client,
    config: StorageConfig,
}

impl HttpObjectStorage {
    pub fn new(config: StorageConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            config,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        debug!("{:<12} --> {} {}", "Storage", method, path);
        self.http
            .request(method, format!("{}{}", self.config.url, path))
            .bearer_auth(&self.config.api_key)
            .header("apikey", &self.config.api_key)
    }

    async fn transfer(&self, path: &str, from: &str, to: &str) -> Result<(), ClientError> {
        let body = ObjectTransfer {
            bucket_id: &self.config.bucket,
            source_key: from,
            destination_key: to,
        };
        let response = self
            .request(reqwest::Method::POST, path)
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ClientError> {
        info!("{:<12} --> 업로드 {} ({} bytes)", "Storage", key, bytes.len());
        let path = format!("/object/{}/{}", self.config.bucket, key);
        let response = self
            .request(reqwest::Method::POST, &path)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn move_object(&self, from: &str, to: &str) -> Result<(), ClientError> {
        info!("{:<12} --> 이동 {} -> {}", "Storage", from, to);
        self.transfer("/object/move", from, to).await
    }

    async fn copy_object(&self, from: &str, to: &str) -> Result<(), ClientError> {
        info!("{:<12} --> 복사 {} -> {}", "Storage", from, to);
        self.transfer("/object/copy", from, to).await
    }

    async fn remove(&self, keys: &[String]) -> Result<(), ClientError> {
        if keys.is_empty() {
            return Ok(());
        }
        info!("{:<12} --> 삭제 {}건", "Storage", keys.len());
        let path = format!("/object/{}", self.config.bucket);
        let response = self
            .request(reqwest::Method::DELETE, &path)
            .json(&RemoveRequest { prefixes: keys })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.config.url, self.config.bucket, key
        )
    }
}
// endregion: --- Http Object Storage

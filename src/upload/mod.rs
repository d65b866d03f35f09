/// 임시저장 경매 이미지 업로드
/// 1. 새 이미지를 임시 경로(tmp/{세션})에 업로드
/// 2. 임시저장 경매 생성/수정
/// 3. 최종 경로(auctions/{id})로 이동, 기존 이미지는 복사
/// 4. 최종 경로를 경매에 연결
/// 실패 시 올린 객체를 지우고, 이번에 만든 임시저장 경매도 지운다 (재시도 없음).
// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Modules
pub mod storage;

pub use storage::{HttpObjectStorage, ObjectStorage};

// endregion: --- Modules

// region:    --- Model
const MAX_IMAGES: usize = 10;
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 경매에 붙일 이미지 (새 파일 또는 이미 저장된 객체)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftImage {
    New(ImageFile),
    Existing { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSpec {
    pub name: String,
    pub value: String,
}

/// 임시저장 경매 입력
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAuction {
    pub title: String,
    pub item_name: String,
    pub description: String,
    pub start_price: i64,
    pub bid_increment: i64,
    pub duration_hours: u32,
    #[serde(default)]
    pub specs: Vec<DraftSpec>,
}

impl DraftAuction {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation("제목을 입력해주세요.".to_string()));
        }
        if self.start_price <= 0 {
            return Err(ClientError::Validation("시작가를 입력해주세요.".to_string()));
        }
        if self.bid_increment <= 0 {
            return Err(ClientError::Validation("입찰 단위를 입력해주세요.".to_string()));
        }
        if self.duration_hours == 0 {
            return Err(ClientError::Validation("경매 기간을 선택해주세요.".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDraft {
    pub auction_id: i64,
    pub image_keys: Vec<String>,
}

pub fn validate_images(images: &[DraftImage]) -> Result<(), ClientError> {
    if images.is_empty() || images.len() > MAX_IMAGES {
        return Err(ClientError::Validation(format!(
            "이미지는 1~{MAX_IMAGES}장 등록할 수 있습니다."
        )));
    }
    for image in images {
        if let DraftImage::New(file) = image {
            if !ALLOWED_TYPES.contains(&file.content_type.as_str()) {
                return Err(ClientError::Validation(format!(
                    "지원하지 않는 이미지 형식입니다: {}",
                    file.file_name
                )));
            }
            if file.bytes.len() > MAX_IMAGE_BYTES {
                return Err(ClientError::Validation(format!(
                    "이미지는 10MB 이하만 등록할 수 있습니다: {}",
                    file.file_name
                )));
            }
        }
    }
    Ok(())
}

/// 객체 키에 쓸 수 있게 파일명 정리
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(|c| c == '_' || c == '.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

fn file_name_of(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
// endregion: --- Model

// region:    --- Draft Store
/// 임시저장 경매 API
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn create_draft(&self, draft: &DraftAuction) -> Result<i64, ClientError>;
    async fn update_draft(&self, auction_id: i64, draft: &DraftAuction) -> Result<(), ClientError>;
    async fn attach_images(&self, auction_id: i64, keys: &[String]) -> Result<(), ClientError>;
    async fn delete_draft(&self, auction_id: i64) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedDraft {
    auction_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttachImages<'a> {
    image_keys: &'a [String],
}

#[async_trait]
impl DraftStore for ApiClient {
    async fn create_draft(&self, draft: &DraftAuction) -> Result<i64, ClientError> {
        let created: CreatedDraft = self.post_json(routes::AUCTIONS, draft).await?;
        Ok(created.auction_id)
    }

    async fn update_draft(&self, auction_id: i64, draft: &DraftAuction) -> Result<(), ClientError> {
        self.send_json(reqwest::Method::PUT, &routes::auction(auction_id), draft)
            .await
    }

    async fn attach_images(&self, auction_id: i64, keys: &[String]) -> Result<(), ClientError> {
        self.send_json(
            reqwest::Method::PUT,
            &routes::auction_images(auction_id),
            &AttachImages { image_keys: keys },
        )
        .await
    }

    async fn delete_draft(&self, auction_id: i64) -> Result<(), ClientError> {
        match self.delete(&routes::auction(auction_id)).await {
            Err(ClientError::NotFound(_)) => Ok(()),
            other => other,
        }
    }
}
// endregion: --- Draft Store

// region:    --- Upload Flow
pub struct DraftUploadFlow<'a> {
    storage: &'a dyn ObjectStorage,
    drafts: &'a dyn DraftStore,
}

impl<'a> DraftUploadFlow<'a> {
    pub fn new(storage: &'a dyn ObjectStorage, drafts: &'a dyn DraftStore) -> Self {
        Self { storage, drafts }
    }

    /// 보상 삭제 (실패해도 진행)
    async fn discard(&self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }
        if let Err(e) = self.storage.remove(keys).await {
            warn!("{:<12} --> 정리 실패 {}건: {}", "Upload", keys.len(), e);
        }
    }

    async fn discard_draft(&self, created: Option<i64>) {
        if let Some(auction_id) = created {
            if let Err(e) = self.drafts.delete_draft(auction_id).await {
                warn!("{:<12} --> 임시저장 삭제 실패 id: {}: {}", "Upload", auction_id, e);
            }
        }
    }

    /// 임시저장 경매 저장 (existing 이 있으면 수정)
    pub async fn save(
        &self,
        existing: Option<i64>,
        draft: &DraftAuction,
        images: Vec<DraftImage>,
    ) -> Result<SavedDraft, ClientError> {
        draft.validate()?;
        validate_images(&images)?;

        // 1. 임시 경로 업로드
        let session = Uuid::new_v4();
        let mut staged: Vec<(usize, String)> = Vec::new();
        let mut sources: Vec<(usize, String, bool)> = Vec::new();
        for (index, image) in images.into_iter().enumerate() {
            match image {
                DraftImage::New(file) => {
                    let key = format!(
                        "tmp/{}/{}-{}",
                        session,
                        index,
                        sanitize_file_name(&file.file_name)
                    );
                    if let Err(e) = self
                        .storage
                        .upload(&key, file.bytes, &file.content_type)
                        .await
                    {
                        warn!("{:<12} --> 업로드 실패: {}", "Upload", e);
                        self.discard(&keys(&staged)).await;
                        return Err(e);
                    }
                    staged.push((index, key.clone()));
                    sources.push((index, key, true));
                }
                DraftImage::Existing { key } => sources.push((index, key, false)),
            }
        }
        info!("{:<12} --> 임시 업로드 완료 {}건", "Upload", staged.len());

        // 2. 임시저장 경매 생성/수정
        let (auction_id, created) = match existing {
            Some(id) => match self.drafts.update_draft(id, draft).await {
                Ok(()) => (id, None),
                Err(e) => {
                    self.discard(&keys(&staged)).await;
                    return Err(e);
                }
            },
            None => match self.drafts.create_draft(draft).await {
                Ok(id) => (id, Some(id)),
                Err(e) => {
                    self.discard(&keys(&staged)).await;
                    return Err(e);
                }
            },
        };

        // 3. 최종 경로로 이동/복사
        let final_prefix = format!("auctions/{auction_id}/");
        let mut finals: Vec<String> = Vec::new();
        let mut written: Vec<String> = Vec::new();
        let mut pending: Vec<String> = keys(&staged);
        // 그대로 쓰는 기존 키는 덮어쓰지 않는다
        let mut reserved: HashSet<String> = sources
            .iter()
            .filter(|(_, key, is_staged)| !is_staged && key.starts_with(&final_prefix))
            .map(|(_, key, _)| key.clone())
            .collect();
        for (index, source, is_staged) in sources {
            if !is_staged && source.starts_with(&final_prefix) {
                finals.push(source);
                continue;
            }
            let base = file_name_of(&source);
            let base = base
                .split_once('-')
                .filter(|_| is_staged)
                .map_or(base, |(_, rest)| rest);
            let mut target = format!("{final_prefix}{index}-{}", sanitize_file_name(base));
            if reserved.contains(&target) {
                let tag = session.simple().to_string();
                target = format!(
                    "{final_prefix}{index}-{}-{}",
                    &tag[..8],
                    sanitize_file_name(base)
                );
            }
            reserved.insert(target.clone());
            let result = if is_staged {
                self.storage.move_object(&source, &target).await
            } else {
                self.storage.copy_object(&source, &target).await
            };
            if let Err(e) = result {
                warn!("{:<12} --> 최종 경로 이동 실패 {}: {}", "Upload", source, e);
                self.discard(&pending).await;
                self.discard(&written).await;
                self.discard_draft(created).await;
                return Err(e);
            }
            pending.retain(|k| k != &source);
            written.push(target.clone());
            finals.push(target);
        }

        // 4. 이미지 연결
        if let Err(e) = self.drafts.attach_images(auction_id, &finals).await {
            warn!("{:<12} --> 이미지 연결 실패 id: {}: {}", "Upload", auction_id, e);
            self.discard(&written).await;
            self.discard_draft(created).await;
            return Err(e);
        }

        info!(
            "{:<12} --> 임시저장 완료 id: {}, 이미지 {}건",
            "Upload",
            auction_id,
            finals.len()
        );
        Ok(SavedDraft {
            auction_id,
            image_keys: finals,
        })
    }
}

fn keys(staged: &[(usize, String)]) -> Vec<String> {
    staged.iter().map(|(_, key)| key.clone()).collect()
}
// endregion: --- Upload Flow

// endregion: --- Tests

// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use crate::listing::pagination::Page;
use crate::listing::view::ListRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Model
const MIN_CONTENT: usize = 10;
const MAX_CONTENT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: i64,
    pub deal_id: i64,
    pub writer_id: i64,
    pub target_id: i64,
    pub rating: u8,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ListRow for Review {
    fn status_key(&self) -> Option<&str> {
        None
    }
}

/// 리뷰 작성/수정 입력
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub deal_id: i64,
    pub rating: u8,
    pub content: String,
}

impl ReviewDraft {
    /// 별점 1~5, 내용 10~1000자 (앞뒤 공백 제외)
    pub fn validated(deal_id: i64, rating: u8, content: &str) -> Result<Self, ClientError> {
        if !(1..=5).contains(&rating) {
            return Err(ClientError::Validation("별점을 선택해주세요.".to_string()));
        }
        let content = content.trim();
        let len = content.chars().count();
        if len < MIN_CONTENT {
            return Err(ClientError::Validation(format!(
                "리뷰는 {MIN_CONTENT}자 이상 입력해주세요."
            )));
        }
        if len > MAX_CONTENT {
            return Err(ClientError::Validation(format!(
                "리뷰는 {MAX_CONTENT}자 이하로 입력해주세요."
            )));
        }
        Ok(Self {
            deal_id,
            rating,
            content: content.to_string(),
        })
    }
}
// endregion: --- Model

// region:    --- Handlers
pub async fn create_review(api: &ApiClient, draft: &ReviewDraft) -> Result<Review, ClientError> {
    info!("{:<12} --> 리뷰 작성 deal: {}", "Review", draft.deal_id);
    api.post_json(routes::REVIEWS, draft).await
}

pub async fn update_review(
    api: &ApiClient,
    review_id: i64,
    draft: &ReviewDraft,
) -> Result<Review, ClientError> {
    info!("{:<12} --> 리뷰 수정 id: {}", "Review", review_id);
    api.put_json(&routes::review(review_id), draft).await
}

/// 리뷰 삭제 (이미 삭제된 경우 성공)
pub async fn delete_review(api: &ApiClient, review_id: i64) -> Result<(), ClientError> {
    info!("{:<12} --> 리뷰 삭제 id: {}", "Review", review_id);
    match api.delete(&routes::review(review_id)).await {
        Err(ClientError::NotFound(_)) => Ok(()),
        other => other,
    }
}

pub async fn my_reviews(api: &ApiClient, page: u32) -> Result<Page<Review>, ClientError> {
    Ok(api
        .get_json(routes::MY_REVIEWS, &[("page", page.to_string())])
        .await?
        .body)
}
// endregion: --- Handlers

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_be_between_one_and_five() {
        assert!(ReviewDraft::validated(1, 0, "정말 친절한 판매자였습니다.").is_err());
        assert!(ReviewDraft::validated(1, 6, "정말 친절한 판매자였습니다.").is_err());
        assert!(ReviewDraft::validated(1, 5, "정말 친절한 판매자였습니다.").is_ok());
    }

    #[test]
    fn content_length_is_counted_in_chars_after_trim() {
        // 한글 10자
        let draft = ReviewDraft::validated(1, 4, "  빠른배송감사합니다요  ").unwrap();
        assert_eq!(draft.content, "빠른배송감사합니다요");
        assert!(ReviewDraft::validated(1, 4, "좋아요").is_err());
        assert!(ReviewDraft::validated(1, 4, &"가".repeat(1001)).is_err());
    }
}
// endregion: --- Tests

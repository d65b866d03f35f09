use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use std::collections::HashSet;
use tracing::info;

/// 관심 경매 목록 (화면 로컬 상태)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<i64>,
}

impl FavoriteSet {
    pub fn contains(&self, auction_id: i64) -> bool {
        self.ids.contains(&auction_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 관심 등록/해제 토글, 토글 후 상태 반환
    /// 등록 시 409, 해제 시 404 는 이미 원하는 상태인 것으로 본다.
    pub async fn toggle(&mut self, api: &ApiClient, auction_id: i64) -> Result<bool, ClientError> {
        let path = routes::favorite(auction_id);
        if self.contains(auction_id) {
            info!("{:<12} --> 관심 해제 id: {}", "Favorite", auction_id);
            match api.delete(&path).await {
                Ok(()) | Err(ClientError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
            self.ids.remove(&auction_id);
            Ok(false)
        } else {
            info!("{:<12} --> 관심 등록 id: {}", "Favorite", auction_id);
            match api.post_empty(&path).await {
                Ok(()) | Err(ClientError::Conflict(_)) => {}
                Err(e) => return Err(e),
            }
            self.ids.insert(auction_id);
            Ok(true)
        }
    }
}

impl FromIterator<i64> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// 내 관심 경매 id 목록 조회
pub async fn load_favorites(api: &ApiClient) -> Result<FavoriteSet, ClientError> {
    let ids: Vec<i64> = api.get_json(routes::FAVORITE_IDS, &[]).await?.body;
    Ok(ids.into_iter().collect())
}

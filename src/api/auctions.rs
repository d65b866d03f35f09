// region:    --- Imports
use super::{routes, ApiClient, Fetched};
use crate::auction::model::{AuctionSnapshot, AuctionStatus, AuctionSummary, SellerCredibility};
use crate::bidding::commands::PlaceBidCommand;
use crate::error::ClientError;
use crate::listing::pagination::Page;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

// endregion: --- Imports

// region:    --- Auction Api Trait
/// 상세 화면 컨트롤러가 사용하는 경매 API
#[async_trait]
pub trait AuctionApi: Send + Sync {
    async fn fetch_auction(&self, auction_id: i64)
        -> Result<Fetched<AuctionSnapshot>, ClientError>;
    async fn place_bid(&self, cmd: &PlaceBidCommand) -> Result<(), ClientError>;
    async fn close_auction(&self, auction_id: i64) -> Result<(), ClientError>;
    async fn stop_auction(&self, auction_id: i64) -> Result<(), ClientError>;
}

#[async_trait]
impl AuctionApi for ApiClient {
    async fn fetch_auction(
        &self,
        auction_id: i64,
    ) -> Result<Fetched<AuctionSnapshot>, ClientError> {
        info!("{:<12} --> 경매 상세 조회 id: {}", "Api", auction_id);
        self.get_json(&routes::auction(auction_id), &[]).await
    }

    async fn place_bid(&self, cmd: &PlaceBidCommand) -> Result<(), ClientError> {
        info!(
            "{:<12} --> 입찰 요청 id: {}, amount: {}",
            "Api", cmd.auction_id, cmd.amount
        );
        self.send_json(reqwest::Method::POST, &routes::auction_bids(cmd.auction_id), cmd)
            .await
    }

    async fn close_auction(&self, auction_id: i64) -> Result<(), ClientError> {
        info!("{:<12} --> 경매 종료 요청 id: {}", "Api", auction_id);
        self.post_empty(&routes::auction_close(auction_id)).await
    }

    async fn stop_auction(&self, auction_id: i64) -> Result<(), ClientError> {
        info!("{:<12} --> 판매 중지 id: {}", "Api", auction_id);
        self.post_empty(&routes::auction_stop(auction_id)).await
    }
}
// endregion: --- Auction Api Trait

// region:    --- Seller Actions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepublishResponse {
    auction_id: i64,
}

/// 판매 중지 (이미 종료된 경우 성공으로 간주)
/// 상세 화면에서는 재조회까지 하는 AuctionDetailController::stop 을 쓴다.
pub async fn stop_auction(api: &ApiClient, auction_id: i64) -> Result<(), ClientError> {
    match AuctionApi::stop_auction(api, auction_id).await {
        Err(e) if e.is_already_done() => {
            info!("{:<12} --> 이미 종료된 경매: {}", "Api", auction_id);
            Ok(())
        }
        other => other,
    }
}

/// 유찰/중지된 경매를 임시저장으로 재등록, 새 경매 id 반환
/// 이미 재등록된 경우 None
pub async fn republish_auction(api: &ApiClient, auction_id: i64) -> Result<Option<i64>, ClientError> {
    info!("{:<12} --> 재등록 id: {}", "Api", auction_id);
    match api
        .post_json::<_, RepublishResponse>(&routes::auction_republish(auction_id), &serde_json::json!({}))
        .await
    {
        Ok(res) => Ok(Some(res.auction_id)),
        Err(e) if e.is_already_done() => Ok(None),
        Err(e) => Err(e),
    }
}

/// 판매자 신뢰도 조회
pub async fn seller_credibility(
    api: &ApiClient,
    auction_id: i64,
) -> Result<SellerCredibility, ClientError> {
    Ok(api
        .get_json(&routes::seller_credibility(auction_id), &[])
        .await?
        .body)
}

/// 경매 목록 조회 조건
#[derive(Debug, Clone, Default)]
pub struct AuctionListQuery {
    pub page: u32,
    pub size: u32,
    pub keyword: Option<String>,
    pub status: Option<AuctionStatus>,
}

impl AuctionListQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.max(1).to_string()),
        ];
        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            params.push(("keyword", keyword.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

/// 경매 목록 조회
pub async fn list_auctions(
    api: &ApiClient,
    query: &AuctionListQuery,
) -> Result<Page<AuctionSummary>, ClientError> {
    info!("{:<12} --> 경매 목록 조회 page: {}", "Api", query.page);
    Ok(api.get_json(routes::AUCTION_LIST, &query.to_params()).await?.body)
}
// endregion: --- Seller Actions

// endregion: --- Tests

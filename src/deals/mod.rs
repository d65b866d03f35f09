/// 낙찰 후 거래 진행
/// 1. 거래 생성 (이미 있으면 그대로 조회)
/// 2. 판매자 확인
/// 3. 구매자 수령 확인
/// 4. 거래 확인서 PDF
// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealStatus {
    PendingSellerConfirm,
    PendingBuyerConfirm,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealRole {
    Buyer,
    Seller,
    Viewer,
}

/// 현재 사용자가 할 수 있는 다음 행동
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealAction {
    SellerConfirm,
    BuyerConfirmReceipt,
    DownloadReceipt,
    WaitForCounterpart,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub deal_id: i64,
    pub auction_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub final_price: i64,
    pub status: DealStatus,
    #[serde(default)]
    pub seller_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub buyer_received_at: Option<DateTime<Utc>>,
}

impl Deal {
    pub fn role_of(&self, viewer_id: Option<i64>) -> DealRole {
        match viewer_id {
            Some(id) if id == self.buyer_id => DealRole::Buyer,
            Some(id) if id == self.seller_id => DealRole::Seller,
            _ => DealRole::Viewer,
        }
    }

    pub fn next_action(&self, viewer_id: Option<i64>) -> DealAction {
        match (self.status, self.role_of(viewer_id)) {
            (_, DealRole::Viewer) | (DealStatus::Cancelled, _) => DealAction::None,
            (DealStatus::Completed, _) => DealAction::DownloadReceipt,
            (DealStatus::PendingSellerConfirm, DealRole::Seller) => DealAction::SellerConfirm,
            (DealStatus::PendingBuyerConfirm, DealRole::Buyer) => {
                DealAction::BuyerConfirmReceipt
            }
            _ => DealAction::WaitForCounterpart,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDealRequest {
    auction_id: i64,
}
// endregion: --- Model

// region:    --- Handlers
/// 경매 기준 거래 조회
pub async fn get_deal_for_auction(api: &ApiClient, auction_id: i64) -> Result<Deal, ClientError> {
    info!("{:<12} --> 거래 조회 auction: {}", "Deal", auction_id);
    Ok(api
        .get_json(&routes::deal_for_auction(auction_id), &[])
        .await?
        .body)
}

/// 거래 생성 후 조회 (이미 생성된 거래면 409 를 무시하고 조회)
pub async fn open_deal_for_auction(api: &ApiClient, auction_id: i64) -> Result<Deal, ClientError> {
    info!("{:<12} --> 거래 생성 auction: {}", "Deal", auction_id);
    match api
        .send_json(
            reqwest::Method::POST,
            routes::DEAL_FROM_AUCTION,
            &CreateDealRequest { auction_id },
        )
        .await
    {
        Ok(()) => {}
        Err(ClientError::Conflict(_)) => {
            info!("{:<12} --> 이미 생성된 거래 auction: {}", "Deal", auction_id);
        }
        Err(e) => return Err(e),
    }
    get_deal_for_auction(api, auction_id).await
}

async fn one_shot(api: &ApiClient, path: &str, label: &str) -> Result<(), ClientError> {
    info!("{:<12} --> {} {}", "Deal", label, path);
    match api.post_empty(path).await {
        Err(ClientError::Conflict(_)) => {
            info!("{:<12} --> 이미 처리된 {}", "Deal", label);
            Ok(())
        }
        other => other,
    }
}

/// 판매자 거래 확인
pub async fn seller_confirm(api: &ApiClient, deal_id: i64) -> Result<(), ClientError> {
    one_shot(api, &routes::deal_seller_confirm(deal_id), "판매자 확인").await
}

/// 구매자 수령 확인
pub async fn buyer_confirm_receipt(api: &ApiClient, deal_id: i64) -> Result<(), ClientError> {
    one_shot(api, &routes::deal_buyer_receive(deal_id), "수령 확인").await
}

/// 거래 확인서 PDF 다운로드
pub async fn download_receipt_pdf(api: &ApiClient, deal_id: i64) -> Result<Vec<u8>, ClientError> {
    info!("{:<12} --> 거래 확인서 다운로드 deal: {}", "Deal", deal_id);
    api.get_bytes(&routes::deal_pdf(deal_id)).await
}
// endregion: --- Handlers

// endregion: --- Tests

use crate::bidding::rules::min_bid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 경매 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Draft,
    Live,
    EndedSold,
    EndedUnsold,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Draft => "DRAFT",
            AuctionStatus::Live => "LIVE",
            AuctionStatus::EndedSold => "ENDED_SOLD",
            AuctionStatus::EndedUnsold => "ENDED_UNSOLD",
        }
    }
}

// 유찰/중지 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndReason {
    NoBids,
    SellerStopped,
}

// 종료 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedOutcome {
    Sold,
    Unsold,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionImage {
    pub url: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub value: String,
}

// 경매 상세 스냅샷 (매 조회마다 통째로 교체)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionSnapshot {
    pub auction_id: i64,
    pub title: String,
    #[serde(default)]
    pub item_name: String,
    pub status: AuctionStatus,
    #[serde(default)]
    pub end_reason: Option<EndReason>,
    pub current_price: i64,
    pub start_price: i64,
    pub bid_increment: i64,
    #[serde(default)]
    pub bid_count: i64,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub highest_bidder_id: Option<i64>,
    pub seller_id: i64,
    #[serde(default)]
    pub images: Vec<AuctionImage>,
    #[serde(default)]
    pub specs: Vec<ItemSpec>,
    /// 응답에 포함된 서버 시각
    #[serde(default)]
    pub server_time: Option<DateTime<Utc>>,
}

impl AuctionSnapshot {
    pub fn is_live(&self) -> bool {
        self.status == AuctionStatus::Live
    }

    pub fn min_bid(&self) -> i64 {
        min_bid(self.current_price, self.bid_increment, self.start_price)
    }

    pub fn is_highest_bidder(&self, viewer_id: Option<i64>) -> bool {
        matches!((viewer_id, self.highest_bidder_id), (Some(v), Some(h)) if v == h)
    }

    pub fn is_seller(&self, viewer_id: Option<i64>) -> bool {
        viewer_id == Some(self.seller_id)
    }

    /// status + endReason 으로 종료 결과 판단
    pub fn closed_outcome(&self) -> Option<ClosedOutcome> {
        match (self.status, self.end_reason) {
            (AuctionStatus::EndedSold, _) => Some(ClosedOutcome::Sold),
            (AuctionStatus::EndedUnsold, Some(EndReason::SellerStopped)) => {
                Some(ClosedOutcome::Cancelled)
            }
            (AuctionStatus::EndedUnsold, _) => Some(ClosedOutcome::Unsold),
            _ => None,
        }
    }

    /// 정렬 순서대로 이미지
    pub fn sorted_images(&self) -> Vec<&AuctionImage> {
        let mut images: Vec<&AuctionImage> = self.images.iter().collect();
        images.sort_by_key(|img| img.sort_order);
        images
    }
}

// 판매자 신뢰도
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerCredibility {
    pub seller_id: i64,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub completed_deals: i64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub report_count: i64,
}

// 경매 목록 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionSummary {
    pub auction_id: i64,
    pub title: String,
    pub status: AuctionStatus,
    pub current_price: i64,
    #[serde(default)]
    pub bid_count: i64,
    pub end_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn live_snapshot() -> AuctionSnapshot {
        AuctionSnapshot {
            auction_id: 7,
            title: "빈티지 카메라".to_string(),
            item_name: "Canon AE-1".to_string(),
            status: AuctionStatus::Live,
            end_reason: None,
            current_price: 100_000,
            start_price: 50_000,
            bid_increment: 5_000,
            bid_count: 3,
            end_at: Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
            highest_bidder_id: Some(42),
            seller_id: 1,
            images: vec![],
            specs: vec![],
            server_time: None,
        }
    }

    #[test]
    fn snapshot_decodes_from_camel_case_json() {
        let json = serde_json::json!({
            "auctionId": 7,
            "title": "빈티지 카메라",
            "itemName": "Canon AE-1",
            "status": "ENDED_UNSOLD",
            "endReason": "SELLER_STOPPED",
            "currentPrice": 100000,
            "startPrice": 50000,
            "bidIncrement": 5000,
            "bidCount": 0,
            "endAt": "2026-10-19T12:00:00Z",
            "sellerId": 1,
            "images": [{"url": "b.jpg", "sortOrder": 2}, {"url": "a.jpg", "sortOrder": 1}]
        });
        let snapshot: AuctionSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.closed_outcome(), Some(ClosedOutcome::Cancelled));
        assert_eq!(snapshot.highest_bidder_id, None);
        assert_eq!(snapshot.sorted_images()[0].url, "a.jpg");
    }

    #[test]
    fn outcome_follows_status_and_reason() {
        let mut snapshot = live_snapshot();
        assert_eq!(snapshot.closed_outcome(), None);

        snapshot.status = AuctionStatus::EndedUnsold;
        snapshot.end_reason = Some(EndReason::NoBids);
        assert_eq!(snapshot.closed_outcome(), Some(ClosedOutcome::Unsold));

        snapshot.status = AuctionStatus::EndedSold;
        assert_eq!(snapshot.closed_outcome(), Some(ClosedOutcome::Sold));
    }

    #[test]
    fn highest_bidder_requires_matching_viewer() {
        let snapshot = live_snapshot();
        assert!(snapshot.is_highest_bidder(Some(42)));
        assert!(!snapshot.is_highest_bidder(Some(41)));
        assert!(!snapshot.is_highest_bidder(None));
        assert_eq!(snapshot.min_bid(), 105_000);
    }
}

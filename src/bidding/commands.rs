/// 입찰 관련 커맨드
// region:    --- Imports
use super::rules::{validate_bid, BidRejection};
use crate::auction::model::AuctionSnapshot;
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령 (POST /api/auctions/{id}/bids 본문)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidCommand {
    #[serde(skip)]
    pub auction_id: i64,
    pub amount: i64,
}

impl PlaceBidCommand {
    /// 최신 스냅샷 기준으로 검증된 입찰 명령 생성
    pub fn prepare(snapshot: &AuctionSnapshot, amount: i64) -> Result<Self, BidRejection> {
        validate_bid(
            amount,
            snapshot.current_price,
            snapshot.bid_increment,
            snapshot.start_price,
        )?;
        Ok(Self {
            auction_id: snapshot.auction_id,
            amount,
        })
    }
}
// endregion: --- Commands

// endregion: --- Tests

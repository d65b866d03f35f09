use super::view::ListRow;
use crate::auction::model::{AuctionStatus, AuctionSummary};
use std::cmp::Ordering;

/// 판매자 경매 목록 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Latest,
    EndingSoon,
    PriceAsc,
    PriceDesc,
    MostBids,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "latest" => Some(SortKey::Latest),
            "ending" => Some(SortKey::EndingSoon),
            "price_asc" => Some(SortKey::PriceAsc),
            "price_desc" => Some(SortKey::PriceDesc),
            "bids" => Some(SortKey::MostBids),
            _ => None,
        }
    }
}

impl ListRow for AuctionSummary {
    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

fn compare(a: &AuctionSummary, b: &AuctionSummary, key: SortKey) -> Ordering {
    match key {
        SortKey::Latest => b.created_at.cmp(&a.created_at),
        // 종료 시간 없는 항목은 뒤로
        SortKey::EndingSoon => match (a.end_at, b.end_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::PriceAsc => a.current_price.cmp(&b.current_price),
        SortKey::PriceDesc => b.current_price.cmp(&a.current_price),
        SortKey::MostBids => b.bid_count.cmp(&a.bid_count),
    }
}

/// 정렬 기준과 무관하게 임시저장(DRAFT)은 항상 마지막
pub fn sort_seller_auctions(items: &mut [AuctionSummary], key: SortKey) {
    items.sort_by(|a, b| {
        let a_draft = a.status == AuctionStatus::Draft;
        let b_draft = b.status == AuctionStatus::Draft;
        a_draft
            .cmp(&b_draft)
            .then_with(|| compare(a, b, key))
    });
}

/// 상태 필터 (None 이면 전체)
pub fn filter_by_status(
    items: &[AuctionSummary],
    status: Option<AuctionStatus>,
) -> Vec<AuctionSummary> {
    items
        .iter()
        .filter(|item| status.map_or(true, |s| item.status == s))
        .cloned()
        .collect()
}

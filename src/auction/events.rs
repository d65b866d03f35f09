use super::model::ClosedOutcome;
use chrono::{DateTime, Utc};

/// 상세 화면 상태 전이에서 발생하는 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    // 입찰 성공
    BidAccepted { amount: i64 },
    // 입찰 실패 (서버/클라이언트 메시지)
    BidFailed { message: String },
    // 최고 입찰자 -> 다른 사람이 더 높은 입찰
    Outbid { current_price: i64 },
    // 마감 직전 입찰로 종료 시간 연장
    Extended { end_at: DateTime<Utc> },
    // 경매 종료
    Closed { outcome: ClosedOutcome },
}

impl DetailEvent {
    /// 토스트 문구
    pub fn message(&self) -> String {
        match self {
            DetailEvent::BidAccepted { amount } => format!(
                "{}원에 입찰했습니다.",
                crate::bidding::rules::format_won(*amount)
            ),
            DetailEvent::BidFailed { message } => message.clone(),
            DetailEvent::Outbid { current_price } => format!(
                "더 높은 입찰이 들어왔습니다. 현재가 {}원",
                crate::bidding::rules::format_won(*current_price)
            ),
            DetailEvent::Extended { .. } => "마감 직전 입찰로 경매 시간이 연장되었습니다.".to_string(),
            DetailEvent::Closed { outcome } => match outcome {
                ClosedOutcome::Sold => "경매가 낙찰로 종료되었습니다.".to_string(),
                ClosedOutcome::Unsold => "입찰자가 없어 유찰되었습니다.".to_string(),
                ClosedOutcome::Cancelled => "판매자가 경매를 중지했습니다.".to_string(),
            },
        }
    }
}

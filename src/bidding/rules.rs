/// 입찰 금액 규칙 (클라이언트 검증, 최종 판단은 서버)
// region:    --- Imports
use std::borrow::Borrow;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Rejection
/// 입찰 금액 검증 실패
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidRejection {
    #[error("입찰 금액을 입력해주세요.")]
    NotPositive,

    #[error("최소 입찰가는 {}원입니다.", format_won(.min))]
    BelowMinimum { min: i64 },

    #[error("입찰 금액은 {}원부터 {}원 단위로 입력해주세요.", format_won(.min), format_won(.increment))]
    OffIncrement { min: i64, increment: i64 },
}
// endregion: --- Rejection

// region:    --- Rules
/// 최소 입찰가 = max(현재가 + 입찰 단위, 시작가)
pub fn min_bid(current_price: i64, bid_increment: i64, start_price: i64) -> i64 {
    current_price
        .saturating_add(bid_increment.max(0))
        .max(start_price)
}

/// 입찰 금액 검증 (0 이하는 최소 입찰가와 무관하게 거절)
pub fn validate_bid(
    amount: i64,
    current_price: i64,
    bid_increment: i64,
    start_price: i64,
) -> Result<(), BidRejection> {
    if amount <= 0 {
        return Err(BidRejection::NotPositive);
    }

    let min = min_bid(current_price, bid_increment, start_price);
    if amount < min {
        return Err(BidRejection::BelowMinimum { min });
    }

    if bid_increment > 0 && amount.saturating_sub(min) % bid_increment != 0 {
        return Err(BidRejection::OffIncrement {
            min,
            increment: bid_increment,
        });
    }

    Ok(())
}

/// amount 이상인 가장 작은 유효 입찰가 (입력 보정용)
pub fn next_valid_bid(amount: i64, current_price: i64, bid_increment: i64, start_price: i64) -> i64 {
    let min = min_bid(current_price, bid_increment, start_price);
    if amount <= min {
        return min;
    }
    if bid_increment <= 0 {
        return amount;
    }
    let over = amount.saturating_sub(min);
    let steps = over / bid_increment + i64::from(over % bid_increment != 0);
    min.saturating_add(steps.saturating_mul(bid_increment))
}

/// 천 단위 구분 금액 표기 (105000 -> "105,000")
pub fn format_won(amount: impl Borrow<i64>) -> String {
    let amount = *amount.borrow();
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0 {
        out.insert(0, '-');
    }
    out
}
// endregion: --- Rules

// endregion: --- Tests

/// 경매 목록 조회
pub const AUCTION_LIST: &str = "/api/auctions/list";

/// 경매(임시저장) 생성
pub const AUCTIONS: &str = "/api/auctions";

/// 거래 생성 (낙찰 경매 기준)
pub const DEAL_FROM_AUCTION: &str = "/api/deals/from-auction";

/// 신고 접수
pub const REPORTS: &str = "/api/reports";

/// 리뷰
pub const REVIEWS: &str = "/api/reviews";

/// 내가 작성한 리뷰
pub const MY_REVIEWS: &str = "/api/reviews/me";

/// 관심 경매 id 목록
pub const FAVORITE_IDS: &str = "/api/favorites/ids";

/// 검색어 자동완성
pub const SEARCH_AUTOCOMPLETE: &str = "/api/search/autocomplete";

/// 인기 검색어
pub const SEARCH_POPULAR: &str = "/api/search/popular";

/// 내 정보
pub const MY_PROFILE: &str = "/api/users/me";

/// 휴대폰 인증번호 발송
pub const PHONE_VERIFICATION: &str = "/api/users/me/phone/verification";

/// 휴대폰 인증번호 확인
pub const PHONE_VERIFICATION_CONFIRM: &str = "/api/users/me/phone/verification/confirm";

/// 관리자: 회원 목록
pub const ADMIN_USERS: &str = "/api/admin/users";

/// 관리자: 신고 목록
pub const ADMIN_REPORTS: &str = "/api/admin/reports";

/// 관리자: 제재 목록/등록
pub const ADMIN_PENALTIES: &str = "/api/admin/penalties";

/// 경매 상세
pub fn auction(auction_id: i64) -> String {
    format!("/api/auctions/{auction_id}")
}

/// 입찰
pub fn auction_bids(auction_id: i64) -> String {
    format!("/api/auctions/{auction_id}/bids")
}

/// 경매 종료 (멱등)
pub fn auction_close(auction_id: i64) -> String {
    format!("/api/auctions/{auction_id}/close")
}

/// 재등록
pub fn auction_republish(auction_id: i64) -> String {
    format!("/api/auctions/{auction_id}/republish")
}

/// 판매 중지
pub fn auction_stop(auction_id: i64) -> String {
    format!("/api/auctions/{auction_id}/stop")
}

/// 판매자 신뢰도
pub fn seller_credibility(auction_id: i64) -> String {
    format!("/api/auctions/{auction_id}/seller-credibility")
}

/// 임시저장 경매 이미지 연결
pub fn auction_images(auction_id: i64) -> String {
    format!("/api/auctions/{auction_id}/images")
}

/// 경매 기준 거래 조회
pub fn deal_for_auction(auction_id: i64) -> String {
    format!("/api/deals/auctions/{auction_id}")
}

/// 판매자 거래 확인
pub fn deal_seller_confirm(deal_id: i64) -> String {
    format!("/api/deals/{deal_id}/seller-confirm")
}

/// 구매자 수령 확인
pub fn deal_buyer_receive(deal_id: i64) -> String {
    format!("/api/deals/{deal_id}/buyer-receive")
}

/// 거래 확인서 PDF
pub fn deal_pdf(deal_id: i64) -> String {
    format!("/api/deals/{deal_id}/pdf")
}

pub fn review(review_id: i64) -> String {
    format!("/api/reviews/{review_id}")
}

pub fn favorite(auction_id: i64) -> String {
    format!("/api/favorites/{auction_id}")
}

/// 관리자: 신고 처리
pub fn admin_report_resolve(report_id: i64) -> String {
    format!("/api/admin/reports/{report_id}/resolve")
}

/// 관리자: 제재 해제
pub fn admin_penalty(penalty_id: i64) -> String {
    format!("/api/admin/penalties/{penalty_id}")
}

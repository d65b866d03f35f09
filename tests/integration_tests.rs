use auction_client::admin::{AdminDashboard, ReportResolution, ResolutionAction};
use auction_client::api::auctions::{self, AuctionListQuery};
use auction_client::api::{routes, ApiClient};
use auction_client::auction::events::DetailEvent;
use auction_client::auction::model::{AuctionStatus, AuctionSummary};
use auction_client::config::ClientConfig;
use auction_client::deals::{self, DealStatus};
use auction_client::detail::countdown::{Clock, ManualClock};
use auction_client::detail::{AuctionDetailController, Banner, DetailState, LiveRole, TickOutcome};
use auction_client::error::ClientError;
use auction_client::favorites::FavoriteSet;
use auction_client::listing::view::{ListView, ListViewConfig};
use auction_client::notify::{MemoryNotifier, Notice};
use auction_client::reviews::{self, ReviewDraft};
use auction_client::scheduler::spawn_detail_session;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

// region:    --- Mock Backend
const VIEWER: i64 = 77;

/// 종료 요청을 받았을 때 서버 동작
#[derive(Clone, Copy)]
enum CloseMode {
    // 이미 종료됨 (409) 후 유찰 상태
    AlreadyUnsold,
    // 마감 직전 입찰로 연장됨 (409), 여전히 LIVE
    Extend,
}

struct Mock {
    snapshot: Mutex<Value>,
    close_mode: CloseMode,
    fetches: AtomicUsize,
    bids: AtomicUsize,
    closes: AtomicUsize,
    stops: AtomicUsize,
    list_query: Mutex<HashMap<String, String>>,
}

impl Mock {
    fn new(snapshot: Value, close_mode: CloseMode) -> Arc<Self> {
        Arc::new(Self {
            snapshot: Mutex::new(snapshot),
            close_mode,
            fetches: AtomicUsize::new(0),
            bids: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
            list_query: Mutex::new(HashMap::new()),
        })
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 11, 0, 0).unwrap()
}

fn end_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn live_snapshot(highest_bidder: Option<i64>) -> Value {
    json!({
        "auctionId": 7,
        "title": "빈티지 카메라",
        "itemName": "Canon AE-1",
        "status": "LIVE",
        "currentPrice": 100000,
        "startPrice": 50000,
        "bidIncrement": 5000,
        "bidCount": if highest_bidder.is_some() { 3 } else { 0 },
        "endAt": end_time(),
        "highestBidderId": highest_bidder,
        "sellerId": 1,
        "serverTime": base_time()
    })
}

async fn get_auction(State(mock): State<Arc<Mock>>, Path(_id): Path<i64>) -> Json<Value> {
    mock.fetches.fetch_add(1, Ordering::SeqCst);
    Json(mock.snapshot.lock().unwrap().clone())
}

async fn post_bid(
    State(mock): State<Arc<Mock>>,
    Path(_id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    mock.bids.fetch_add(1, Ordering::SeqCst);
    let mut snapshot = mock.snapshot.lock().unwrap();
    snapshot["currentPrice"] = body["amount"].clone();
    snapshot["highestBidderId"] = json!(VIEWER);
    StatusCode::OK
}

async fn post_close(
    State(mock): State<Arc<Mock>>,
    Path(_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    mock.closes.fetch_add(1, Ordering::SeqCst);
    let mut snapshot = mock.snapshot.lock().unwrap();
    match mock.close_mode {
        CloseMode::AlreadyUnsold => {
            snapshot["status"] = json!("ENDED_UNSOLD");
            snapshot["endReason"] = json!("NO_BIDS");
        }
        CloseMode::Extend => {
            let end_at: DateTime<Utc> =
                serde_json::from_value(snapshot["endAt"].clone()).unwrap();
            snapshot["endAt"] = json!(end_at + Duration::minutes(3));
        }
    }
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": "이미 처리된 요청입니다." })),
    )
}

/// 판매 중지: 상태를 중지로 바꾸고 이미 처리됨(409) 응답
async fn post_stop(
    State(mock): State<Arc<Mock>>,
    Path(_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    mock.stops.fetch_add(1, Ordering::SeqCst);
    let mut snapshot = mock.snapshot.lock().unwrap();
    snapshot["status"] = json!("ENDED_UNSOLD");
    snapshot["endReason"] = json!("SELLER_STOPPED");
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": "이미 처리된 요청입니다." })),
    )
}

async fn get_credibility(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!({
        "sellerId": 1,
        "nickname": "카메라상점",
        "completedDeals": 12,
        "reviewCount": 8,
        "averageRating": 4.5,
        "reportCount": 0
    }))
}

async fn get_list(
    State(mock): State<Arc<Mock>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    *mock.list_query.lock().unwrap() = params.clone();
    if params.get("page").map(String::as_str) == Some("99") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "boom" })),
        );
    }
    let content: Vec<Value> = (91..=95)
        .map(|id| {
            json!({
                "auctionId": id,
                "title": format!("경매 {id}"),
                "status": if id == 95 { "ENDED_SOLD" } else { "LIVE" },
                "currentPrice": 10000,
                "endAt": end_time(),
                "createdAt": base_time()
            })
        })
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "content": content,
            "pageInfo": {
                "currentPage": 9, "size": 10, "totalElements": 95,
                "totalPages": 10, "hasNext": false, "hasPrevious": true
            }
        })),
    )
}

async fn conflict() -> (StatusCode, Json<Value>) {
    (
        StatusCode::CONFLICT,
        Json(json!({ "message": "이미 존재합니다." })),
    )
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn get_deal(Path(auction_id): Path<i64>) -> Json<Value> {
    Json(json!({
        "dealId": 300,
        "auctionId": auction_id,
        "buyerId": VIEWER,
        "sellerId": 1,
        "finalPrice": 105000,
        "status": "PENDING_SELLER_CONFIRM"
    }))
}

async fn get_pdf(Path(_id): Path<i64>) -> ([(header::HeaderName, &'static str); 1], &'static [u8]) {
    ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 receipt")
}

fn review_json(review_id: i64, body: &Value) -> Value {
    json!({
        "reviewId": review_id,
        "dealId": body["dealId"].clone(),
        "writerId": VIEWER,
        "targetId": 1,
        "rating": body["rating"].clone(),
        "content": body["content"].clone(),
        "createdAt": base_time()
    })
}

async fn post_review(Json(body): Json<Value>) -> Json<Value> {
    Json(review_json(900, &body))
}

async fn put_review(Path(review_id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(review_json(review_id, &body))
}

async fn get_my_reviews() -> Json<Value> {
    let body = json!({ "dealId": 300, "rating": 5, "content": "포장이 꼼꼼했습니다." });
    Json(json!({
        "content": [review_json(900, &body)],
        "pageInfo": {
            "currentPage": 0, "size": 10, "totalElements": 1,
            "totalPages": 1, "hasNext": false, "hasPrevious": false
        }
    }))
}

/// 목 서버 실행 후 설정 반환
async fn serve(mock: Arc<Mock>) -> ClientConfig {
    let app = Router::new()
        .route("/api/auctions/list", get(get_list))
        .route("/api/auctions/:id", get(get_auction))
        .route("/api/auctions/:id/bids", post(post_bid))
        .route("/api/auctions/:id/close", post(post_close))
        .route("/api/auctions/:id/stop", post(post_stop))
        .route("/api/auctions/:id/republish", post(conflict))
        .route("/api/auctions/:id/seller-credibility", get(get_credibility))
        .route(routes::DEAL_FROM_AUCTION, post(conflict))
        .route("/api/deals/auctions/:id", get(get_deal))
        .route("/api/deals/:id/seller-confirm", post(conflict))
        .route("/api/deals/:id/buyer-receive", post(conflict))
        .route("/api/deals/:id/pdf", get(get_pdf))
        .route("/api/reviews", post(post_review))
        .route("/api/reviews/me", get(get_my_reviews))
        .route("/api/reviews/:id", put(put_review).delete(not_found))
        .route("/api/admin/reports/:id/resolve", post(conflict))
        .route("/api/admin/penalties/:id", axum::routing::delete(not_found))
        .route("/api/favorites/:id", post(conflict).delete(not_found))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    ClientConfig::new(format!("http://{addr}")).with_viewer(VIEWER)
}

struct Fixture {
    mock: Arc<Mock>,
    api: ApiClient,
    clock: Arc<ManualClock>,
    notifier: Arc<MemoryNotifier>,
}

impl Fixture {
    async fn new(snapshot: Value, close_mode: CloseMode) -> Self {
        let mock = Mock::new(snapshot, close_mode);
        let config = serve(Arc::clone(&mock)).await;
        Self {
            mock,
            api: ApiClient::new(config).unwrap(),
            clock: Arc::new(ManualClock::new(base_time())),
            notifier: Arc::new(MemoryNotifier::new()),
        }
    }

    fn controller(&self) -> AuctionDetailController {
        self.controller_as(VIEWER)
    }

    fn controller_as(&self, viewer_id: i64) -> AuctionDetailController {
        AuctionDetailController::new(
            7,
            Some(viewer_id),
            Arc::new(self.api.clone()),
            self.clock.clone(),
            self.notifier.clone(),
        )
    }
}
// endregion: --- Mock Backend

// region:    --- Detail
/// 입찰 후 정확히 한 번 재조회
#[tokio::test]
async fn bid_refetches_exactly_once() {
    let fx = Fixture::new(live_snapshot(Some(42)), CloseMode::AlreadyUnsold).await;
    let mut controller = fx.controller();

    controller.load().await.unwrap();
    assert_eq!(controller.state(), DetailState::Live(LiveRole::Bidding));
    assert_eq!(controller.view().min_bid, Some(105_000));
    assert_eq!(fx.mock.fetches.load(Ordering::SeqCst), 1);

    // 최소 입찰가 미만은 요청 없이 거절
    let err = controller.submit_bid(100_000).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(fx.mock.bids.load(Ordering::SeqCst), 0);

    controller.submit_bid(105_000).await.unwrap();
    assert_eq!(fx.mock.bids.load(Ordering::SeqCst), 1);
    assert_eq!(fx.mock.fetches.load(Ordering::SeqCst), 2);

    let view = controller.view();
    assert_eq!(view.state, DetailState::Live(LiveRole::Highest));
    assert_eq!(view.current_price, Some(105_000));
    assert!(view.submit_enabled);
    assert!(fx
        .notifier
        .messages()
        .contains(&DetailEvent::BidAccepted { amount: 105_000 }.message()));
}

/// 만료 시 종료 요청 한 번, 409 는 무시하고 재조회
#[tokio::test]
async fn expiry_with_conflict_shows_unsold_banner() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let mut controller = fx.controller();
    controller.load().await.unwrap();

    fx.clock.set(end_time() - Duration::seconds(1));
    assert!(matches!(
        controller.tick(fx.clock.now()),
        TickOutcome::Running { .. }
    ));

    fx.clock.advance(Duration::seconds(2));
    assert_eq!(controller.tick(fx.clock.now()), TickOutcome::Expired);
    controller.handle_expiry().await.unwrap();

    assert_eq!(fx.mock.closes.load(Ordering::SeqCst), 1);
    assert_eq!(fx.mock.fetches.load(Ordering::SeqCst), 2);
    let view = controller.view();
    assert_eq!(view.banner, Some(Banner::Unsold));
    assert!(!view.bid_form_visible);

    // 종료 후에는 더 이상 종료 요청 없음
    assert_eq!(controller.tick(fx.clock.now()), TickOutcome::Idle);
    controller.handle_expiry().await.unwrap();
    assert_eq!(fx.mock.closes.load(Ordering::SeqCst), 1);
}

/// 연장되면 카운트다운 재시작, 새 종료 시각에 다시 한 번 종료 요청
#[tokio::test]
async fn extension_restarts_countdown() {
    let fx = Fixture::new(live_snapshot(Some(42)), CloseMode::Extend).await;
    let mut controller = fx.controller();
    controller.load().await.unwrap();

    fx.clock.set(end_time() + Duration::seconds(1));
    assert_eq!(controller.tick(fx.clock.now()), TickOutcome::Expired);
    controller.handle_expiry().await.unwrap();

    assert_eq!(fx.mock.closes.load(Ordering::SeqCst), 1);
    assert_eq!(controller.state(), DetailState::Live(LiveRole::Bidding));
    assert!(matches!(
        controller.tick(fx.clock.now()),
        TickOutcome::Running { .. }
    ));
    let extended = DetailEvent::Extended {
        end_at: end_time() + Duration::minutes(3),
    };
    assert!(fx.notifier.messages().contains(&extended.message()));

    fx.clock.advance(Duration::minutes(3));
    assert_eq!(controller.tick(fx.clock.now()), TickOutcome::Expired);
    controller.handle_expiry().await.unwrap();
    assert_eq!(fx.mock.closes.load(Ordering::SeqCst), 2);
}

/// 세션 핸들: 입찰, 만료 처리가 타이머 태스크에서 진행
#[tokio::test]
async fn session_runs_bid_and_expiry() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let session = spawn_detail_session(fx.controller(), std::time::Duration::from_millis(10));
    let mut views = session.subscribe();

    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        views.wait_for(|v| matches!(v.state, DetailState::Live(_))),
    )
    .await
    .unwrap()
    .unwrap();

    session.place_bid(105_000).await.unwrap();
    assert_eq!(fx.mock.bids.load(Ordering::SeqCst), 1);
    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        views.wait_for(|v| v.state == DetailState::Live(LiveRole::Highest)),
    )
    .await
    .unwrap()
    .unwrap();

    fx.clock.set(end_time() + Duration::seconds(1));
    tokio::time::timeout(
        std::time::Duration::from_secs(5),
        views.wait_for(|v| matches!(v.state, DetailState::Closed(_))),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(fx.mock.closes.load(Ordering::SeqCst), 1);
    assert!(!session.is_finished());
}
/// 판매자 중지: 409 는 성공으로 보고 한 번 재조회 후 중지 배너
#[tokio::test]
async fn seller_stop_with_conflict_shows_cancelled_banner() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let mut controller = fx.controller_as(1);
    controller.load().await.unwrap();

    controller.stop().await.unwrap();
    assert_eq!(fx.mock.stops.load(Ordering::SeqCst), 1);
    assert_eq!(fx.mock.fetches.load(Ordering::SeqCst), 2);
    assert_eq!(controller.view().banner, Some(Banner::Cancelled));
    assert!(fx
        .notifier
        .messages()
        .contains(&"판매자가 경매를 중지했습니다.".to_string()));

    // 상세 화면 밖에서의 중지도 409 를 성공으로 처리
    auctions::stop_auction(&fx.api, 7).await.unwrap();
    assert_eq!(fx.mock.stops.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn republish_conflict_returns_none() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    assert_eq!(auctions::republish_auction(&fx.api, 7).await.unwrap(), None);
}

#[tokio::test]
async fn seller_credibility_is_decoded() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let credibility = auctions::seller_credibility(&fx.api, 7).await.unwrap();
    assert_eq!(credibility.seller_id, 1);
    assert_eq!(credibility.nickname, "카메라상점");
    assert_eq!(credibility.completed_deals, 12);
    assert_eq!(credibility.average_rating, Some(4.5));
}
// endregion: --- Detail

// region:    --- Listing
#[tokio::test]
async fn list_view_renders_last_page_and_error_state() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let config = ListViewConfig::new(routes::AUCTION_LIST, "등록된 경매가 없습니다.")
        .status("LIVE", "진행중", "badge-success")
        .status("ENDED_SOLD", "낙찰", "badge-primary");
    let view: ListView<AuctionSummary> = ListView::new(fx.api.clone(), fx.notifier.clone(), config);

    let render = view.load(9, &[]).await;
    assert!(!render.is_error());
    assert_eq!(render.range_text, "91-95");
    assert_eq!(render.pages, vec![5, 6, 7, 8, 9]);
    assert_eq!(render.rows.len(), 5);
    assert_eq!(render.rows[4].badge.as_ref().unwrap().label, "낙찰");
    assert_eq!(render.empty_message, None);

    let failed = view.load(99, &[]).await;
    assert!(failed.is_error());
    assert!(failed.rows.is_empty());
    assert!(fx.notifier.take().is_empty());
}
#[tokio::test]
async fn list_auctions_sends_trimmed_filters() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let query = AuctionListQuery {
        page: 9,
        size: 10,
        keyword: Some("  카메라 ".to_string()),
        status: Some(AuctionStatus::Live),
    };

    let page = auctions::list_auctions(&fx.api, &query).await.unwrap();
    assert_eq!(page.content.len(), 5);
    assert_eq!(page.page_info.total_elements, 95);

    let sent = fx.mock.list_query.lock().unwrap().clone();
    assert_eq!(sent.get("page").map(String::as_str), Some("9"));
    assert_eq!(sent.get("keyword").map(String::as_str), Some("카메라"));
    assert_eq!(sent.get("status").map(String::as_str), Some("LIVE"));
}
// endregion: --- Listing

// region:    --- Admin
#[tokio::test]
async fn admin_resolve_and_lift_treat_already_done_as_success() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let mut admin = AdminDashboard::new(fx.api.clone(), fx.notifier.clone());
    let resolution = ReportResolution {
        action: ResolutionAction::Resolved,
        memo: Some("경고 처리".to_string()),
    };

    // 선택된 신고 없이 처리하면 요청 없이 거절
    assert!(matches!(
        admin.resolve_current_report(&resolution).await,
        Err(ClientError::Validation(_))
    ));

    admin.open_report(5);
    admin.resolve_current_report(&resolution).await.unwrap();
    assert_eq!(admin.current_report_id, None);

    admin.lift_penalty(9).await.unwrap();
}
// endregion: --- Admin

// region:    --- Deals / Favorites
#[tokio::test]
async fn deal_open_and_confirm_tolerate_conflict() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;

    let deal = deals::open_deal_for_auction(&fx.api, 7).await.unwrap();
    assert_eq!(deal.deal_id, 300);
    assert_eq!(deal.status, DealStatus::PendingSellerConfirm);

    deals::seller_confirm(&fx.api, deal.deal_id).await.unwrap();
    deals::buyer_confirm_receipt(&fx.api, deal.deal_id).await.unwrap();

    let pdf = deals::download_receipt_pdf(&fx.api, deal.deal_id).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn review_lifecycle() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let draft = ReviewDraft::validated(300, 5, "  포장이 꼼꼼했습니다.  ").unwrap();

    let created = reviews::create_review(&fx.api, &draft).await.unwrap();
    assert_eq!(created.review_id, 900);
    assert_eq!(created.deal_id, 300);
    assert_eq!(created.content, "포장이 꼼꼼했습니다.");

    let edit = ReviewDraft::validated(300, 4, "다시 봐도 만족스러운 거래였습니다.").unwrap();
    let updated = reviews::update_review(&fx.api, created.review_id, &edit).await.unwrap();
    assert_eq!(updated.review_id, 900);
    assert_eq!(updated.rating, 4);

    let mine = reviews::my_reviews(&fx.api, 0).await.unwrap();
    assert_eq!(mine.content.len(), 1);
    assert_eq!(mine.content[0].writer_id, VIEWER);

    // 이미 삭제된 리뷰(404)도 성공
    reviews::delete_review(&fx.api, created.review_id).await.unwrap();
}

#[tokio::test]
async fn favorite_toggle_treats_conflict_and_missing_as_done() {
    let fx = Fixture::new(live_snapshot(None), CloseMode::AlreadyUnsold).await;
    let mut favorites = FavoriteSet::default();

    assert!(favorites.toggle(&fx.api, 7).await.unwrap());
    assert!(favorites.contains(7));

    assert!(!favorites.toggle(&fx.api, 7).await.unwrap());
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn unauthorized_list_redirects_to_login() {
    let app = Router::new().route(
        routes::AUCTION_LIST,
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = ApiClient::new(ClientConfig::new(format!("http://{addr}"))).unwrap();
    let notifier = Arc::new(MemoryNotifier::new());
    let view: ListView<AuctionSummary> = ListView::new(
        api,
        notifier.clone(),
        ListViewConfig::new(routes::AUCTION_LIST, "등록된 경매가 없습니다.")
            .page_path("/auctions"),
    );

    assert!(view.load(0, &[]).await.is_error());
    assert_eq!(
        notifier.take(),
        vec![Notice::RedirectToLogin {
            return_to: "/auctions".to_string()
        }]
    );
}
// endregion: --- Deals / Favorites

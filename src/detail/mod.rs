/// 경매 상세 컨트롤러
/// 최초 조회, 입찰, 카운트다운 만료 세 가지 계기로 서버 상태와 화면을 맞춘다.
/// 최고 입찰자 여부는 항상 마지막으로 조회한 서버 스냅샷 기준이다.
// region:    --- Imports
use crate::api::auctions::AuctionApi;
use crate::auction::events::DetailEvent;
use crate::auction::model::{AuctionSnapshot, AuctionStatus, ClosedOutcome};
use crate::bidding::commands::PlaceBidCommand;
use crate::error::ClientError;
use crate::notify::{Notice, Notifier, ToastLevel};
use chrono::{DateTime, Duration, Utc};
use self::countdown::{format_remaining, remaining, Clock, ClockOffset};
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Modules
pub mod countdown;

// endregion: --- Modules

// region:    --- State
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRole {
    Bidding,
    Highest,
}

/// 상세 화면 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    /// 최초 조회 실패 (에러 화면)
    Unavailable,
    /// 게시 전 미리보기
    Draft,
    Live(LiveRole),
    /// 카운트다운 만료 후 종료 요청 중
    Ending,
    Closed(ClosedOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Sold,
    Unsold,
    Cancelled,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        match self {
            Banner::Sold => "낙찰된 경매입니다.",
            Banner::Unsold => "입찰자가 없어 유찰된 경매입니다.",
            Banner::Cancelled => "판매자가 판매를 중지한 경매입니다.",
        }
    }
}

/// 타이머 한 번의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running { remaining: Duration },
    Expired,
}

/// 화면 렌더 모델
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub state: DetailState,
    pub bid_form_visible: bool,
    pub submit_enabled: bool,
    pub banner: Option<Banner>,
    pub min_bid: Option<i64>,
    pub current_price: Option<i64>,
    pub remaining: Option<Duration>,
    pub countdown_text: String,
}

fn derive_state(snapshot: &AuctionSnapshot, viewer_id: Option<i64>) -> DetailState {
    match snapshot.status {
        AuctionStatus::Draft => DetailState::Draft,
        AuctionStatus::Live if snapshot.is_highest_bidder(viewer_id) => {
            DetailState::Live(LiveRole::Highest)
        }
        AuctionStatus::Live => DetailState::Live(LiveRole::Bidding),
        AuctionStatus::EndedSold | AuctionStatus::EndedUnsold => snapshot
            .closed_outcome()
            .map(DetailState::Closed)
            .unwrap_or(DetailState::Closed(ClosedOutcome::Unsold)),
    }
}
// endregion: --- State

// region:    --- Controller
// 종료 후 재조회 실패 시 재시도 간격
const REFETCH_RETRY_SECS: i64 = 2;

pub struct AuctionDetailController {
    auction_id: i64,
    viewer_id: Option<i64>,
    api: Arc<dyn AuctionApi>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    state: DetailState,
    snapshot: Option<AuctionSnapshot>,
    offset: Option<ClockOffset>,
    submitting: bool,
    // 종료 요청을 보낸 종료 시각 (같은 만료에 대해 한 번만)
    close_attempted_for: Option<DateTime<Utc>>,
    // 종료 후 재조회 재시도 시각
    refetch_retry_at: Option<DateTime<Utc>>,
}

impl AuctionDetailController {
    pub fn new(
        auction_id: i64,
        viewer_id: Option<i64>,
        api: Arc<dyn AuctionApi>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auction_id,
            viewer_id,
            api,
            clock,
            notifier,
            state: DetailState::Loading,
            snapshot: None,
            offset: None,
            submitting: false,
            close_attempted_for: None,
            refetch_retry_at: None,
        }
    }

    pub fn auction_id(&self) -> i64 {
        self.auction_id
    }

    pub fn state(&self) -> DetailState {
        self.state
    }

    pub fn snapshot(&self) -> Option<&AuctionSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn clock_offset(&self) -> Option<ClockOffset> {
        self.offset
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn page_path(&self) -> String {
        format!("/auctions/{}", self.auction_id)
    }

    fn emit(&self, event: &DetailEvent) {
        let level = match event {
            DetailEvent::BidAccepted { .. } => ToastLevel::Success,
            DetailEvent::BidFailed { .. } => ToastLevel::Error,
            DetailEvent::Outbid { .. } | DetailEvent::Extended { .. } => ToastLevel::Warning,
            DetailEvent::Closed { .. } => ToastLevel::Info,
        };
        self.notifier.notify(Notice::toast(level, event.message()));
    }

    /// 1. 최초 조회
    pub async fn load(&mut self) -> Result<(), ClientError> {
        info!("{:<12} --> 상세 조회 시작 id: {}", "Detail", self.auction_id);
        self.state = DetailState::Loading;
        match self.refresh().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("{:<12} --> 상세 조회 실패: {}", "Detail", e);
                if self.snapshot.is_none() {
                    self.state = DetailState::Unavailable;
                }
                self.notifier.notify(Notice::from_error(&e, &self.page_path()));
                Err(e)
            }
        }
    }

    /// 전체 상세 재조회 (부분 갱신 없음)
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let fetched = self.api.fetch_auction(self.auction_id).await?;
        self.refetch_retry_at = None;

        // 시차는 최초 응답에서 한 번만 측정
        if self.offset.is_none() {
            let server_now = fetched.body.server_time.or(fetched.server_time);
            let offset = server_now
                .map(|server| ClockOffset::measure(server, self.clock.now()))
                .unwrap_or_default();
            info!(
                "{:<12} --> 서버 시차 측정: {}ms",
                "Detail",
                offset.as_duration().num_milliseconds()
            );
            self.offset = Some(offset);
        }

        for event in self.apply_snapshot(fetched.body) {
            self.emit(&event);
        }
        Ok(())
    }

    /// 새 스냅샷 반영, 상태 전이 이벤트 반환
    fn apply_snapshot(&mut self, next: AuctionSnapshot) -> Vec<DetailEvent> {
        let mut events = Vec::new();
        let next_state = derive_state(&next, self.viewer_id);

        if let Some(prev) = &self.snapshot {
            let was_highest = self.state == DetailState::Live(LiveRole::Highest)
                || (self.state == DetailState::Ending && prev.is_highest_bidder(self.viewer_id));
            if was_highest && next_state == DetailState::Live(LiveRole::Bidding) {
                events.push(DetailEvent::Outbid {
                    current_price: next.current_price,
                });
            }

            if prev.is_live() && next.is_live() && next.end_at > prev.end_at {
                events.push(DetailEvent::Extended { end_at: next.end_at });
            }

            let was_closed = matches!(self.state, DetailState::Closed(_));
            if let DetailState::Closed(outcome) = next_state {
                if !was_closed {
                    events.push(DetailEvent::Closed { outcome });
                }
            }
        }

        info!(
            "{:<12} --> 상태 전이: {:?} -> {:?}",
            "Detail", self.state, next_state
        );
        self.state = next_state;
        self.snapshot = Some(next);
        events
    }

    /// 2. 입찰
    /// 성공 시 정확히 한 번 재조회한 뒤에 제출 버튼을 다시 활성화한다.
    pub async fn submit_bid(&mut self, amount: i64) -> Result<(), ClientError> {
        if self.submitting {
            return Err(ClientError::Busy);
        }

        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| ClientError::Validation("경매 정보를 불러오는 중입니다.".to_string()))?;
        if !matches!(self.state, DetailState::Live(_)) {
            return Err(ClientError::Validation(
                "입찰할 수 없는 경매입니다.".to_string(),
            ));
        }
        if self.viewer_id.is_none() {
            let err = ClientError::Unauthorized;
            self.notifier.notify(Notice::from_error(&err, &self.page_path()));
            return Err(err);
        }
        if snapshot.is_seller(self.viewer_id) {
            return Err(ClientError::Validation(
                "본인 경매에는 입찰할 수 없습니다.".to_string(),
            ));
        }
        let cmd = PlaceBidCommand::prepare(snapshot, amount)
            .map_err(|rejection| ClientError::Validation(rejection.to_string()))?;

        self.submitting = true;
        let result = self.place_and_refresh(&cmd).await;
        self.submitting = false;
        result
    }

    async fn place_and_refresh(&mut self, cmd: &PlaceBidCommand) -> Result<(), ClientError> {
        info!(
            "{:<12} --> 입찰 제출 id: {}, amount: {}",
            "Detail", cmd.auction_id, cmd.amount
        );
        if let Err(e) = self.api.place_bid(cmd).await {
            warn!("{:<12} --> 입찰 실패: {}", "Detail", e);
            match e {
                ClientError::Unauthorized => {
                    self.notifier.notify(Notice::from_error(&e, &self.page_path()))
                }
                _ => self.emit(&DetailEvent::BidFailed {
                    message: e.user_message(),
                }),
            }
            return Err(e);
        }

        self.emit(&DetailEvent::BidAccepted { amount: cmd.amount });

        // 낙관적 증가 없이 서버 값으로 갱신
        if let Err(e) = self.refresh().await {
            warn!("{:<12} --> 입찰 후 재조회 실패: {}", "Detail", e);
            self.notifier.notify(Notice::from_error(&e, &self.page_path()));
        }
        Ok(())
    }

    /// 3. 타이머 (로컬 시각 기준, 서버 시차 적용)
    pub fn tick(&self, local_now: DateTime<Utc>) -> TickOutcome {
        let Some(snapshot) = &self.snapshot else {
            return TickOutcome::Idle;
        };
        // 종료 후 재조회 실패: 대기 시간이 지나면 재조회만 다시 시도
        if self.state == DetailState::Ending {
            return match self.refetch_retry_at {
                Some(at) if local_now >= at => TickOutcome::Expired,
                _ => TickOutcome::Idle,
            };
        }
        if !matches!(self.state, DetailState::Live(_)) {
            return TickOutcome::Idle;
        }

        let server_now = self.offset.unwrap_or_default().server_now(local_now);
        let left = remaining(snapshot.end_at, server_now);
        if left > Duration::zero() {
            TickOutcome::Running { remaining: left }
        } else if self.close_attempted_for == Some(snapshot.end_at) {
            TickOutcome::Idle
        } else {
            TickOutcome::Expired
        }
    }

    /// 4. 카운트다운 만료: 종료 요청 한 번 + 재조회 한 번
    /// 서버가 여전히 LIVE 이고 종료 시각이 바뀌었으면 카운트다운을 다시 시작한다.
    /// 재조회가 실패하면 Ending 에 머물고 다음 타이머에서 재조회만 다시 한다.
    pub async fn handle_expiry(&mut self) -> Result<(), ClientError> {
        if self.state == DetailState::Ending && self.refetch_retry_at.is_some() {
            return self.refetch_after_close().await;
        }
        let Some(end_at) = self.snapshot.as_ref().map(|s| s.end_at) else {
            return Ok(());
        };
        if self.close_attempted_for == Some(end_at) || !matches!(self.state, DetailState::Live(_)) {
            return Ok(());
        }
        self.close_attempted_for = Some(end_at);
        self.state = DetailState::Ending;
        info!("{:<12} --> 카운트다운 만료, 종료 요청 id: {}", "Detail", self.auction_id);

        match self.api.close_auction(self.auction_id).await {
            Ok(()) => {}
            Err(e) if e.is_already_done() => {
                info!("{:<12} --> 이미 종료 처리됨: {}", "Detail", e);
            }
            Err(e) => {
                warn!("{:<12} --> 종료 요청 실패: {}", "Detail", e);
                self.notifier.notify(Notice::from_error(&e, &self.page_path()));
            }
        }

        self.refetch_after_close().await
    }

    async fn refetch_after_close(&mut self) -> Result<(), ClientError> {
        match self.refresh().await {
            Ok(()) => {
                self.refetch_retry_at = None;
                Ok(())
            }
            Err(e) => {
                warn!("{:<12} --> 종료 후 재조회 실패: {}", "Detail", e);
                // 같은 실패 토스트는 한 번만
                if self.refetch_retry_at.is_none() {
                    self.notifier.notify(Notice::from_error(&e, &self.page_path()));
                }
                self.state = DetailState::Ending;
                self.refetch_retry_at =
                    Some(self.clock.now() + Duration::seconds(REFETCH_RETRY_SECS));
                Err(e)
            }
        }
    }

    /// 판매 중지 (판매자만), 결과와 무관하게 한 번 재조회
    pub async fn stop(&mut self) -> Result<(), ClientError> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| ClientError::Validation("경매 정보를 불러오는 중입니다.".to_string()))?;
        if !snapshot.is_seller(self.viewer_id) {
            return Err(ClientError::Validation(
                "판매자만 판매를 중지할 수 있습니다.".to_string(),
            ));
        }
        if !matches!(self.state, DetailState::Live(_)) {
            return Err(ClientError::Validation(
                "진행 중인 경매만 중지할 수 있습니다.".to_string(),
            ));
        }

        info!("{:<12} --> 판매 중지 요청 id: {}", "Detail", self.auction_id);
        let stopped = match self.api.stop_auction(self.auction_id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_already_done() => {
                info!("{:<12} --> 이미 종료된 경매: {}", "Detail", e);
                Ok(())
            }
            Err(e) => {
                warn!("{:<12} --> 판매 중지 실패: {}", "Detail", e);
                self.notifier.notify(Notice::from_error(&e, &self.page_path()));
                Err(e)
            }
        };

        if let Err(e) = self.refresh().await {
            warn!("{:<12} --> 판매 중지 후 재조회 실패: {}", "Detail", e);
            self.notifier.notify(Notice::from_error(&e, &self.page_path()));
            return stopped.and(Err(e));
        }
        stopped
    }

    pub fn view(&self) -> DetailView {
        self.view_at(self.clock.now())
    }

    pub fn view_at(&self, local_now: DateTime<Utc>) -> DetailView {
        let snapshot = self.snapshot.as_ref();
        let is_seller = snapshot.is_some_and(|s| s.is_seller(self.viewer_id));
        let bid_form_visible = matches!(self.state, DetailState::Live(_)) && !is_seller;
        let banner = match self.state {
            DetailState::Closed(ClosedOutcome::Sold) => Some(Banner::Sold),
            DetailState::Closed(ClosedOutcome::Unsold) => Some(Banner::Unsold),
            DetailState::Closed(ClosedOutcome::Cancelled) => Some(Banner::Cancelled),
            _ => None,
        };

        let remaining_time = match (self.state, snapshot) {
            (DetailState::Live(_), Some(s)) => Some(remaining(
                s.end_at,
                self.offset.unwrap_or_default().server_now(local_now),
            )),
            _ => None,
        };
        let countdown_text = match self.state {
            DetailState::Loading => "불러오는 중".to_string(),
            DetailState::Unavailable => "-".to_string(),
            DetailState::Draft => "게시 전".to_string(),
            DetailState::Ending => "종료 처리 중".to_string(),
            DetailState::Closed(_) => "종료".to_string(),
            DetailState::Live(_) => format_remaining(remaining_time.unwrap_or_else(Duration::zero)),
        };

        DetailView {
            state: self.state,
            bid_form_visible,
            submit_enabled: bid_form_visible && !self.submitting,
            banner,
            min_bid: bid_form_visible.then(|| snapshot.map(|s| s.min_bid())).flatten(),
            current_price: snapshot.map(|s| s.current_price),
            remaining: remaining_time,
            countdown_text,
        }
    }
}
// endregion: --- Controller

// endregion: --- Tests

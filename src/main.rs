// region:    --- Imports
use auction_client::api::ApiClient;
use auction_client::config::ClientConfig;
use auction_client::detail::countdown::SystemClock;
use auction_client::detail::AuctionDetailController;
use auction_client::notify::TracingNotifier;
use auction_client::scheduler::spawn_detail_session;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
/// 사용법: auction-watch <auction_id>
/// 표준 입력 명령: "bid <금액>", "refresh", "stop", "status", "quit"
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let auction_id: i64 = match std::env::args().nth(1).map(|raw| raw.parse()) {
        Some(Ok(id)) => id,
        _ => {
            error!("{:<12} --> 사용법: auction-watch <auction_id>", "Main");
            return Err("missing auction id".into());
        }
    };

    // 설정 및 API 클라이언트
    let config = ClientConfig::load()?;
    let tick = config.countdown_tick;
    let viewer_id = config.viewer_id;
    let notifier = Arc::new(TracingNotifier::new(&config));
    let api = ApiClient::new(config)?;
    info!("{:<12} --> API: {}", "Main", api.config().api_base_url);

    // 상세 화면 세션 시작
    let controller = AuctionDetailController::new(
        auction_id,
        viewer_id,
        Arc::new(api),
        Arc::new(SystemClock),
        notifier,
    );
    let session = spawn_detail_session(controller, tick);

    // 화면 상태 변화 출력
    let mut views = session.subscribe();
    tokio::spawn(async move {
        let mut last_state = None;
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if last_state != Some(view.state) {
                info!(
                    "{:<12} --> 상태: {:?}, 현재가: {:?}, 최소 입찰가: {:?}",
                    "Main", view.state, view.current_price, view.min_bid
                );
                if let Some(banner) = view.banner {
                    info!("{:<12} --> {}", "Main", banner.message());
                }
                last_state = Some(view.state);
            }
        }
    });

    // 명령 처리
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("bid"), Some(raw)) => match raw.replace(',', "").parse::<i64>() {
                Ok(amount) => {
                    if let Err(e) = session.place_bid(amount).await {
                        warn!("{:<12} --> 입찰 실패: {}", "Main", e.user_message());
                    }
                }
                Err(_) => warn!("{:<12} --> 금액을 숫자로 입력해주세요: {}", "Main", raw),
            },
            (Some("refresh"), None) => session.refresh().await,
            (Some("stop"), None) => {
                if let Err(e) = session.stop().await {
                    warn!("{:<12} --> 판매 중지 실패: {}", "Main", e.user_message());
                }
            }
            (Some("status"), None) => {
                let view = session.view();
                info!(
                    "{:<12} --> {:?} 남은 시간: {}",
                    "Main", view.state, view.countdown_text
                );
            }
            (Some("quit"), None) => break,
            (None, _) => {}
            _ => warn!("{:<12} --> 알 수 없는 명령: {}", "Main", line),
        }
    }

    info!("{:<12} --> 종료", "Main");
    Ok(())
}
// endregion: --- Main

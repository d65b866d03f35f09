/// 상세 화면 세션 실행기
/// 컨트롤러를 한 태스크가 소유하고, 250ms 타이머와 명령 채널을 번갈아 처리한다.
/// 핸들이 drop 되면 태스크(타이머 포함)를 중단한다.
// region:    --- Imports
use crate::detail::{AuctionDetailController, DetailView, TickOutcome};
use crate::error::ClientError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

// endregion: --- Imports

// region:    --- Commands
/// 세션에 보내는 명령
#[derive(Debug)]
pub enum DetailCommand {
    PlaceBid {
        amount: i64,
        reply: oneshot::Sender<Result<(), ClientError>>,
    },
    Refresh,
    Stop {
        reply: oneshot::Sender<Result<(), ClientError>>,
    },
}
// endregion: --- Commands

// region:    --- Session Handle
pub struct DetailSessionHandle {
    commands: mpsc::Sender<DetailCommand>,
    views: watch::Receiver<DetailView>,
    task: JoinHandle<()>,
}

impl DetailSessionHandle {
    /// 입찰 요청, 처리 중인 입찰이 있으면 Busy
    pub async fn place_bid(&self, amount: i64) -> Result<(), ClientError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(DetailCommand::PlaceBid { amount, reply })
            .await
            .map_err(|_| ClientError::Validation("화면이 이미 종료되었습니다.".to_string()))?;
        rx.await
            .map_err(|_| ClientError::Validation("화면이 이미 종료되었습니다.".to_string()))?
    }

    /// 판매 중지 (판매자)
    pub async fn stop(&self) -> Result<(), ClientError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(DetailCommand::Stop { reply })
            .await
            .map_err(|_| ClientError::Validation("화면이 이미 종료되었습니다.".to_string()))?;
        rx.await
            .map_err(|_| ClientError::Validation("화면이 이미 종료되었습니다.".to_string()))?
    }

    pub async fn refresh(&self) {
        if self.commands.send(DetailCommand::Refresh).await.is_err() {
            debug!("{:<12} --> 종료된 세션에 새로고침 요청", "Session");
        }
    }

    /// 현재 렌더 모델
    pub fn view(&self) -> DetailView {
        self.views.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailView> {
        self.views.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DetailSessionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
// endregion: --- Session Handle

// region:    --- Session
/// 세션 시작
pub fn spawn_detail_session(
    controller: AuctionDetailController,
    tick: Duration,
) -> DetailSessionHandle {
    let (commands, rx) = mpsc::channel(16);
    let (views_tx, views) = watch::channel(controller.view());
    let task = tokio::spawn(run(controller, rx, views_tx, tick));
    DetailSessionHandle {
        commands,
        views,
        task,
    }
}

async fn run(
    mut controller: AuctionDetailController,
    mut commands: mpsc::Receiver<DetailCommand>,
    views: watch::Sender<DetailView>,
    tick: Duration,
) {
    info!(
        "{:<12} --> 세션 시작 id: {}",
        "Session",
        controller.auction_id()
    );
    if let Err(e) = controller.load().await {
        warn!("{:<12} --> 최초 조회 실패: {}", "Session", e);
    }
    views.send_replace(controller.view());

    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if controller.tick(controller.now()) == TickOutcome::Expired {
                    if let Err(e) = controller.handle_expiry().await {
                        warn!("{:<12} --> 만료 처리 실패: {}", "Session", e);
                    }
                }
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                handle_command(&mut controller, command).await;
                // 처리 중에 쌓인 입찰은 버튼 비활성화와 같게 거절
                while let Ok(queued) = commands.try_recv() {
                    match queued {
                        DetailCommand::PlaceBid { reply, .. } => {
                            let _ = reply.send(Err(ClientError::Busy));
                        }
                        other => handle_command(&mut controller, other).await,
                    }
                }
            }
        }
        views.send_replace(controller.view());
    }
    info!("{:<12} --> 세션 종료", "Session");
}

async fn handle_command(controller: &mut AuctionDetailController, command: DetailCommand) {
    match command {
        DetailCommand::PlaceBid { amount, reply } => {
            let result = controller.submit_bid(amount).await;
            let _ = reply.send(result);
        }
        DetailCommand::Refresh => {
            if let Err(e) = controller.refresh().await {
                warn!("{:<12} --> 새로고침 실패: {}", "Session", e);
            }
        }
        DetailCommand::Stop { reply } => {
            let result = controller.stop().await;
            let _ = reply.send(result);
        }
    }
}
// endregion: --- Session

// region:    --- Imports
use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorKind};
use std::sync::Mutex;
use tracing::{error, info, warn};

// endregion: --- Imports

// region:    --- Notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// 화면에 전달되는 알림
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Toast { level: ToastLevel, message: String },
    RedirectToLogin { return_to: String },
}

impl Notice {
    pub fn toast(level: ToastLevel, message: impl Into<String>) -> Self {
        Notice::Toast {
            level,
            message: message.into(),
        }
    }

    /// 에러 분류에 맞는 알림 생성
    pub fn from_error(err: &ClientError, return_to: &str) -> Self {
        match err {
            ClientError::Unauthorized => Notice::RedirectToLogin {
                return_to: return_to.to_string(),
            },
            _ => {
                let level = match err.kind() {
                    ErrorKind::Validation | ErrorKind::Idempotent => ToastLevel::Warning,
                    _ => ToastLevel::Error,
                };
                Notice::toast(level, err.user_message())
            }
        }
    }
}

/// 알림 수신자 (토스트, 페이지 이동)
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
// endregion: --- Notice

// region:    --- Notifiers
/// 알림을 로그로 출력
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    config: ClientConfig,
}

impl TracingNotifier {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// 로그인 이동 알림의 대상 주소
    pub fn redirect_target(&self, notice: &Notice) -> Option<String> {
        match notice {
            Notice::RedirectToLogin { return_to } => Some(self.config.login_url(return_to)),
            Notice::Toast { .. } => None,
        }
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Toast { level, message } => match level {
                ToastLevel::Success | ToastLevel::Info => info!("{:<12} --> {}", "Toast", message),
                ToastLevel::Warning => warn!("{:<12} --> {}", "Toast", message),
                ToastLevel::Error => error!("{:<12} --> {}", "Toast", message),
            },
            Notice::RedirectToLogin { return_to } => {
                warn!(
                    "{:<12} --> 로그인 페이지로 이동: {}",
                    "Toast",
                    self.config.login_url(&return_to)
                )
            }
        }
    }
}

/// 알림을 메모리에 쌓아두는 수신자 (임베딩/테스트용)
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.take()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Toast { message, .. } => Some(message),
                Notice::RedirectToLogin { .. } => None,
            })
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut guard) => guard.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
// endregion: --- Notifiers

// endregion: --- Tests

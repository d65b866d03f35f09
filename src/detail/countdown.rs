/// 카운트다운 계산
/// 남은 시간 = 종료 시각 - (로컬 시각 + 서버 시차)
// region:    --- Imports
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

// endregion: --- Imports

// region:    --- Clock
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 움직이는 시계
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
// endregion: --- Clock

// region:    --- Offset
/// 서버 시각 - 로컬 시각 (최초 조회 시 한 번만 측정)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockOffset(Duration);

impl Default for ClockOffset {
    fn default() -> Self {
        ClockOffset(Duration::zero())
    }
}

impl ClockOffset {
    pub fn measure(server_now: DateTime<Utc>, local_now: DateTime<Utc>) -> Self {
        ClockOffset(server_now - local_now)
    }

    pub fn server_now(&self, local_now: DateTime<Utc>) -> DateTime<Utc> {
        local_now + self.0
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}
// endregion: --- Offset

// region:    --- Remaining
/// 남은 시간 (음수는 0)
pub fn remaining(end_at: DateTime<Utc>, server_now: DateTime<Utc>) -> Duration {
    (end_at - server_now).max(Duration::zero())
}

/// "1일 02:03:04" / "02:03:04"
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    if days > 0 {
        format!("{days}일 {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}
// endregion: --- Remaining

// endregion: --- Tests

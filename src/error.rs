// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Client Error
/// 클라이언트 공통 에러
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("네트워크 오류가 발생했습니다: {0}")]
    Network(#[from] reqwest::Error),

    #[error("응답을 해석할 수 없습니다: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("로그인이 필요합니다.")]
    Unauthorized,

    #[error("{}", .0.as_deref().unwrap_or("권한이 없습니다."))]
    Forbidden(Option<String>),

    #[error("{}", .0.as_deref().unwrap_or("대상을 찾을 수 없습니다."))]
    NotFound(Option<String>),

    #[error("{}", .0.as_deref().unwrap_or("이미 처리된 요청입니다."))]
    Conflict(Option<String>),

    /// 서버가 비즈니스 규칙으로 거절한 요청 (메시지는 그대로 노출)
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("설정 오류: {0}")]
    Config(String),

    #[error("이미 처리 중인 요청이 있습니다.")]
    Busy,
}

/// 에러 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 네트워크/파싱 실패: 일반 토스트
    Network,
    /// 클라이언트 검증 실패: 입력 필드 메시지
    Validation,
    /// 401/403: 로그인 이동 또는 차단 토스트
    Auth,
    /// 404/409: 멱등 액션에서는 성공으로 간주
    Idempotent,
    /// 서버 거절: 메시지 그대로 표시
    Business,
}

impl ClientError {
    /// HTTP 상태 코드로 에러 생성
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            _ => ClientError::Rejected {
                status,
                message: message.unwrap_or_else(|| format!("요청이 실패했습니다. ({status})")),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) | ClientError::Decode(_) | ClientError::Config(_) => {
                ErrorKind::Network
            }
            ClientError::Validation(_) | ClientError::Busy => ErrorKind::Validation,
            ClientError::Unauthorized | ClientError::Forbidden(_) => ErrorKind::Auth,
            ClientError::NotFound(_) | ClientError::Conflict(_) => ErrorKind::Idempotent,
            ClientError::Rejected { .. } => ErrorKind::Business,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            ClientError::Unauthorized => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Conflict(_) => Some(409),
            ClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 종료/재등록 같은 멱등 액션에서 이미 처리된 것으로 볼 수 있는지
    pub fn is_already_done(&self) -> bool {
        matches!(self, ClientError::NotFound(_) | ClientError::Conflict(_))
    }

    /// 사용자에게 보여줄 메시지
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Network => "일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요.".to_string(),
            _ => self.to_string(),
        }
    }
}
// endregion: --- Client Error

// endregion: --- Tests

use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use tracing::info;

const MAX_DETAIL: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportTarget {
    Auction,
    User,
    Review,
}

/// 신고 접수 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub target_type: ReportTarget,
    pub target_id: i64,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ReportRequest {
    pub fn validated(
        target_type: ReportTarget,
        target_id: i64,
        reason: &str,
        detail: &str,
    ) -> Result<Self, ClientError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ClientError::Validation("신고 사유를 선택해주세요.".to_string()));
        }
        let detail = detail.trim();
        if detail.chars().count() > MAX_DETAIL {
            return Err(ClientError::Validation(format!(
                "상세 내용은 {MAX_DETAIL}자 이하로 입력해주세요."
            )));
        }
        Ok(Self {
            target_type,
            target_id,
            reason: reason.to_string(),
            detail: (!detail.is_empty()).then(|| detail.to_string()),
        })
    }
}

/// 신고 접수 (같은 대상 중복 신고는 409)
pub async fn submit_report(api: &ApiClient, request: &ReportRequest) -> Result<(), ClientError> {
    info!(
        "{:<12} --> 신고 접수 {:?} id: {}",
        "Report", request.target_type, request.target_id
    );
    api.send_json(reqwest::Method::POST, routes::REPORTS, request)
        .await
}

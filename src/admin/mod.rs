/// 관리자 운영 화면
/// 회원/신고/제재 목록과 신고 처리, 제재 등록/해제
// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use crate::listing::view::{ListRender, ListRow, ListView, ListViewConfig};
use crate::notify::Notifier;
use crate::reports::ReportTarget;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Rows
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub status: String,
    #[serde(default)]
    pub report_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ListRow for AdminUserRow {
    fn status_key(&self) -> Option<&str> {
        Some(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReportRow {
    pub report_id: i64,
    pub reporter_id: i64,
    pub target_type: ReportTarget,
    pub target_id: i64,
    pub reason: String,
    #[serde(default)]
    pub detail: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ListRow for AdminReportRow {
    fn status_key(&self) -> Option<&str> {
        Some(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyType {
    Warning,
    Suspension,
    Ban,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyRow {
    pub penalty_id: i64,
    pub user_id: i64,
    pub penalty_type: PenaltyType,
    pub reason: String,
    pub status: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl ListRow for PenaltyRow {
    fn status_key(&self) -> Option<&str> {
        Some(&self.status)
    }
}
// endregion: --- Rows

// region:    --- Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionAction {
    Resolved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResolution {
    pub action: ResolutionAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyRequest {
    pub user_id: i64,
    pub penalty_type: PenaltyType,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<i64>,
}

impl PenaltyRequest {
    /// 사유 필수, 정지는 1~365일
    pub fn validated(
        user_id: i64,
        penalty_type: PenaltyType,
        reason: &str,
        days: Option<u32>,
    ) -> Result<Self, ClientError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ClientError::Validation("제재 사유를 입력해주세요.".to_string()));
        }
        let days = match penalty_type {
            PenaltyType::Suspension => match days {
                Some(d) if (1..=365).contains(&d) => Some(d),
                _ => {
                    return Err(ClientError::Validation(
                        "정지 기간은 1~365일 사이로 입력해주세요.".to_string(),
                    ))
                }
            },
            _ => None,
        };
        Ok(Self {
            user_id,
            penalty_type,
            reason: reason.to_string(),
            days,
            report_id: None,
        })
    }

    pub fn for_report(mut self, report_id: i64) -> Self {
        self.report_id = Some(report_id);
        self
    }
}
// endregion: --- Requests

// region:    --- Dashboard
/// 화면별 상태 (현재 페이지, 열려 있는 신고)
pub struct AdminDashboard {
    api: ApiClient,
    users: ListView<AdminUserRow>,
    reports: ListView<AdminReportRow>,
    penalties: ListView<PenaltyRow>,
    pub current_user_page: u32,
    pub current_report_page: u32,
    pub current_penalty_page: u32,
    pub current_report_id: Option<i64>,
}

impl AdminDashboard {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let users = ListViewConfig::new(routes::ADMIN_USERS, "회원이 없습니다.")
            .page_path("/admin/users")
            .status("ACTIVE", "정상", "badge-success")
            .status("SUSPENDED", "정지", "badge-warning")
            .status("BANNED", "영구정지", "badge-danger")
            .status("WITHDRAWN", "탈퇴", "badge-secondary");
        let reports = ListViewConfig::new(routes::ADMIN_REPORTS, "접수된 신고가 없습니다.")
            .page_path("/admin/reports")
            .status("PENDING", "대기", "badge-warning")
            .status("RESOLVED", "처리완료", "badge-success")
            .status("REJECTED", "반려", "badge-secondary");
        let penalties = ListViewConfig::new(routes::ADMIN_PENALTIES, "제재 내역이 없습니다.")
            .page_path("/admin/penalties")
            .status("ACTIVE", "적용중", "badge-danger")
            .status("LIFTED", "해제", "badge-secondary")
            .status("EXPIRED", "만료", "badge-secondary");

        Self {
            users: ListView::new(api.clone(), Arc::clone(&notifier), users),
            reports: ListView::new(api.clone(), Arc::clone(&notifier), reports),
            penalties: ListView::new(api.clone(), notifier, penalties),
            api,
            current_user_page: 0,
            current_report_page: 0,
            current_penalty_page: 0,
            current_report_id: None,
        }
    }

    pub async fn load_users(&mut self, page: u32, keyword: Option<&str>) -> ListRender<AdminUserRow> {
        self.current_user_page = page;
        let filters: Vec<(&str, String)> = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| vec![("keyword", k.to_string())])
            .unwrap_or_default();
        self.users.load(page, &filters).await
    }

    pub async fn load_reports(&mut self, page: u32, status: Option<&str>) -> ListRender<AdminReportRow> {
        self.current_report_page = page;
        let filters: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.to_string())])
            .unwrap_or_default();
        self.reports.load(page, &filters).await
    }

    pub async fn load_penalties(&mut self, page: u32) -> ListRender<PenaltyRow> {
        self.current_penalty_page = page;
        self.penalties.load(page, &[]).await
    }

    pub fn open_report(&mut self, report_id: i64) {
        self.current_report_id = Some(report_id);
    }

    pub fn close_report(&mut self) {
        self.current_report_id = None;
    }

    /// 신고 처리 (이미 처리된 신고면 성공)
    pub async fn resolve_report(
        &self,
        report_id: i64,
        resolution: &ReportResolution,
    ) -> Result<(), ClientError> {
        info!(
            "{:<12} --> 신고 처리 id: {}, {:?}",
            "Admin", report_id, resolution.action
        );
        match self
            .api
            .send_json(
                reqwest::Method::POST,
                &routes::admin_report_resolve(report_id),
                resolution,
            )
            .await
        {
            Ok(()) | Err(ClientError::Conflict(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// 열려 있는 신고 처리 후 닫기
    pub async fn resolve_current_report(
        &mut self,
        resolution: &ReportResolution,
    ) -> Result<(), ClientError> {
        let report_id = self
            .current_report_id
            .ok_or_else(|| ClientError::Validation("처리할 신고를 선택해주세요.".to_string()))?;
        self.resolve_report(report_id, resolution).await?;
        self.close_report();
        Ok(())
    }

    pub async fn apply_penalty(&self, request: &PenaltyRequest) -> Result<(), ClientError> {
        info!(
            "{:<12} --> 제재 등록 user: {}, {:?}",
            "Admin", request.user_id, request.penalty_type
        );
        self.api
            .send_json(reqwest::Method::POST, routes::ADMIN_PENALTIES, request)
            .await
    }

    /// 제재 해제 (이미 해제된 경우 성공)
    pub async fn lift_penalty(&self, penalty_id: i64) -> Result<(), ClientError> {
        info!("{:<12} --> 제재 해제 id: {}", "Admin", penalty_id);
        match self.api.delete(&routes::admin_penalty(penalty_id)).await {
            Err(ClientError::NotFound(_)) => Ok(()),
            other => other,
        }
    }
}
// endregion: --- Dashboard

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspension_needs_valid_days() {
        assert!(PenaltyRequest::validated(3, PenaltyType::Suspension, "욕설", None).is_err());
        assert!(PenaltyRequest::validated(3, PenaltyType::Suspension, "욕설", Some(400)).is_err());
        let ok = PenaltyRequest::validated(3, PenaltyType::Suspension, "욕설", Some(7)).unwrap();
        assert_eq!(ok.days, Some(7));
    }

    #[test]
    fn warning_ignores_days_and_requires_reason() {
        let warning = PenaltyRequest::validated(3, PenaltyType::Warning, "도배", Some(7))
            .unwrap()
            .for_report(11);
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            serde_json::json!({
                "userId": 3, "penaltyType": "WARNING", "reason": "도배", "reportId": 11
            })
        );
        assert!(PenaltyRequest::validated(3, PenaltyType::Ban, "  ", None).is_err());
    }
}
// endregion: --- Tests

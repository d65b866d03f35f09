/// 내 정보 / 휴대폰 인증
// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub phone_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub nickname: String,
}

impl ProfileUpdate {
    pub fn validated(nickname: &str) -> Result<Self, ClientError> {
        let nickname = nickname.trim();
        let len = nickname.chars().count();
        if !(2..=20).contains(&len) {
            return Err(ClientError::Validation(
                "닉네임은 2~20자로 입력해주세요.".to_string(),
            ));
        }
        Ok(Self {
            nickname: nickname.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct PhoneRequest<'a> {
    phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
}

/// 휴대폰 번호 정규화 (하이픈 제거, 01x 로 시작하는 10~11자리)
pub fn normalize_phone(raw: &str) -> Result<String, ClientError> {
    let digits: String = raw.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect();
    let valid = digits.chars().all(|c| c.is_ascii_digit())
        && (10..=11).contains(&digits.len())
        && digits.starts_with("01");
    if valid {
        Ok(digits)
    } else {
        Err(ClientError::Validation(
            "올바른 휴대폰 번호를 입력해주세요.".to_string(),
        ))
    }
}

fn validate_code(code: &str) -> Result<&str, ClientError> {
    let code = code.trim();
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(code)
    } else {
        Err(ClientError::Validation(
            "인증번호 6자리를 입력해주세요.".to_string(),
        ))
    }
}
// endregion: --- Model

// region:    --- Handlers
pub async fn my_profile(api: &ApiClient) -> Result<UserProfile, ClientError> {
    Ok(api.get_json(routes::MY_PROFILE, &[]).await?.body)
}

pub async fn update_profile(
    api: &ApiClient,
    update: &ProfileUpdate,
) -> Result<UserProfile, ClientError> {
    info!("{:<12} --> 내 정보 수정", "Profile");
    api.put_json(routes::MY_PROFILE, update).await
}

/// 인증번호 발송, 정규화된 번호 반환
pub async fn send_verification_code(api: &ApiClient, raw_phone: &str) -> Result<String, ClientError> {
    let phone = normalize_phone(raw_phone)?;
    info!("{:<12} --> 인증번호 발송", "Profile");
    api.send_json(
        reqwest::Method::POST,
        routes::PHONE_VERIFICATION,
        &PhoneRequest {
            phone: &phone,
            code: None,
        },
    )
    .await?;
    Ok(phone)
}

/// 인증번호 확인
pub async fn confirm_verification_code(
    api: &ApiClient,
    raw_phone: &str,
    code: &str,
) -> Result<(), ClientError> {
    let phone = normalize_phone(raw_phone)?;
    let code = validate_code(code)?;
    info!("{:<12} --> 인증번호 확인", "Profile");
    api.send_json(
        reqwest::Method::POST,
        routes::PHONE_VERIFICATION_CONFIRM,
        &PhoneRequest {
            phone: &phone,
            code: Some(code),
        },
    )
    .await
}
// endregion: --- Handlers

// endregion: --- Tests

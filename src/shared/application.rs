/**
 * Franchise Application Types
 *
 * Request and record types for the franchise application form. The field
 * names follow the form posted by the OrcaX site (`owner`, `biznum`, `addr`,
 * `biztype`), with `kakaoId` / `nickname` identifying the logged-in applicant.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Submitted application form
///
/// Every field is optional on the wire; the handler decides which are
/// required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub biznum: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub addr: Option<String>,
    #[serde(default)]
    pub biztype: Option<String>,
    #[serde(default)]
    pub kakao_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Stored franchise application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub owner: Option<String>,
    pub phone: Option<String>,
    pub biznum: Option<String>,
    pub region: Option<String>,
    pub addr: Option<String>,
    pub biztype: Option<String>,
    pub kakao_id: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Build a record from a request whose identity fields were already validated
    pub fn from_request(request: ApplyRequest, kakao_id: String, nickname: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: request.owner,
            phone: request.phone,
            biznum: request.biznum,
            region: request.region,
            addr: request.addr,
            biztype: request.biztype,
            kakao_id,
            nickname,
            created_at: Utc::now(),
        }
    }
}

/// Response body for a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub success: bool,
    pub message: String,
}

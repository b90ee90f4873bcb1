//! Response records for the non-party endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use userdesk_auth::Permission;

/// Body of a `login` request. The backend expects upper-case keys.
#[derive(Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    #[serde(rename = "USERNAME")]
    pub username: &'a str,
    #[serde(rename = "PASSWORD")]
    pub password: &'a str,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    /// Expiry as epoch milliseconds.
    #[serde(default)]
    pub expiration_time: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginResponse {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiration_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }
}

impl core::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("expiration_time", &self.expiration_time)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeZone {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimeZonesResponse {
    #[serde(default)]
    pub time_zones: Vec<TimeZone>,
}

/// Generic service acknowledgement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of one `getPermissions` page request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PermissionPageRequest<'a> {
    pub view_index: u32,
    pub view_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_ids: Option<&'a [Permission]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PermissionDoc {
    pub permission_id: Permission,
}

/// One page of `getPermissions`. `docs` stays `None` when the key is absent
/// so a missing page can be told apart from an empty one.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PermissionPage {
    #[serde(default)]
    pub docs: Option<Vec<PermissionDoc>>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl PermissionPage {
    pub fn into_permissions(self) -> Option<Vec<Permission>> {
        self.docs
            .map(|docs| docs.into_iter().map(|doc| doc.permission_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_request_uses_upper_case_keys() {
        let body = LoginRequest {
            username: "hotwax.user",
            password: "secret",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"USERNAME": "hotwax.user", "PASSWORD": "secret"})
        );
    }

    #[test]
    fn login_response_expiry() {
        let resp: LoginResponse =
            serde_json::from_value(json!({"token": "t", "expirationTime": 1_700_000_000_000i64}))
                .unwrap();
        let at = resp.expires_at().unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
        assert!(resp.is_expired_at(at));
        assert!(!resp.is_expired_at(at - chrono::Duration::seconds(1)));
        assert!(!format!("{resp:?}").contains("\"t\""));
    }

    #[test]
    fn permission_page_distinguishes_missing_docs() {
        let missing: PermissionPage = serde_json::from_value(json!({"count": 3})).unwrap();
        assert!(missing.into_permissions().is_none());

        let empty: PermissionPage = serde_json::from_value(json!({"docs": []})).unwrap();
        assert_eq!(empty.into_permissions(), Some(vec![]));
    }

    #[test]
    fn permission_page_request_omits_all_filter() {
        let body = PermissionPageRequest {
            view_index: 2,
            view_size: 200,
            permission_ids: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"viewIndex": 2, "viewSize": 200})
        );
    }
}

//! Records describing the logged-in user and the user being administered.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use userdesk_core::{PartyId, UserLoginId};

/// Profile returned by the `user-profile` endpoint.
///
/// Only the fields the client reads are typed; the rest of the payload is
/// preserved in `extra` so it can be handed back to callers untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_login_id: UserLoginId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<PartyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_time_zone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The user currently opened for administration (not the logged-in user).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedUser {
    pub party_id: PartyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_login_id: Option<UserLoginId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectedUser {
    /// Display name: group name for organisations, "first last" for people.
    pub fn display_name(&self) -> Option<String> {
        if let Some(group) = self.group_name.as_deref().filter(|g| !g.is_empty()) {
            return Some(group.to_string());
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

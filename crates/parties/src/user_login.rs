//! Requests that act on a party's user login.

use serde::{Deserialize, Serialize};

use userdesk_core::error::require_non_blank;
use userdesk_core::{DomainError, DomainResult, UserLoginId};

/// The backend's `"Y"` / `"N"` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl From<YesNo> for bool {
    fn from(value: YesNo) -> Self {
        value == YesNo::Yes
    }
}

/// Body for `service/resetPassword`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    pub user_login_id: UserLoginId,
    pub new_password: String,
    pub new_password_verify: String,
}

impl ResetPassword {
    pub fn new(user_login_id: UserLoginId, new_password: impl Into<String>) -> Self {
        let new_password = new_password.into();
        Self {
            user_login_id,
            new_password_verify: new_password.clone(),
            new_password,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("newPassword", &self.new_password)?;
        if self.new_password != self.new_password_verify {
            return Err(DomainError::validation("passwords do not match"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for ResetPassword {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResetPassword")
            .field("user_login_id", &self.user_login_id)
            .field("new_password", &"<redacted>")
            .finish()
    }
}

/// Body for `service/updateUserLoginStatus` (enable / disable a login).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserLoginStatus {
    pub user_login_id: UserLoginId,
    pub enabled: YesNo,
}

impl UpdateUserLoginStatus {
    pub fn new(user_login_id: UserLoginId, enabled: bool) -> Self {
        Self {
            user_login_id,
            enabled: enabled.into(),
        }
    }
}

/// Body for `setUserTimeZone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetUserTimeZone {
    pub tz_id: String,
}

impl SetUserTimeZone {
    pub fn new(tz_id: impl Into<String>) -> Self {
        Self { tz_id: tz_id.into() }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("tzId", &self.tz_id)
    }
}

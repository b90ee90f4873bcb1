use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque backend strings (e.g. `"USERS_ADMIN"`,
/// `"COMMON_VIEW"`). The client never interprets them beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Which permissions to ask the server about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PermissionFilter {
    /// Every permission the server knows for the user.
    #[default]
    All,
    /// Only the listed identifiers.
    Only(Vec<Permission>),
}

impl PermissionFilter {
    pub fn only<I, P>(ids: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::Only(ids.into_iter().map(Into::into).collect())
    }

    /// Identifiers to send as `permissionIds`; `None` means "all".
    pub fn permission_ids(&self) -> Option<&[Permission]> {
        match self {
            Self::All => None,
            Self::Only(ids) => Some(ids),
        }
    }

    /// An explicit but empty selection: nothing can match, so the server is
    /// not worth asking.
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::Only(ids) if ids.is_empty())
    }
}

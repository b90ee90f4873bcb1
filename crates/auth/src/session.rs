//! Session context: the client-side state a logged-in user carries around.
//!
//! Lifecycle: [`Session::begin`] on login, read through the accessors while
//! authenticated, [`Session::clear`] on logout. The stored instance survives
//! logout so the next login targets the same backend.

use std::collections::HashSet;

use crate::base_url::{resolve_base_url, resolve_instance_url};
use crate::permissions::Permission;
use crate::profile::{SelectedUser, UserProfile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    profile: Option<UserProfile>,
    permissions: Vec<Permission>,
    instance_url: Option<String>,
    selected_user: Option<SelectedUser>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A logged-out session pointed at a specific instance.
    pub fn with_instance_url(instance_url: impl Into<String>) -> Self {
        Self {
            instance_url: Some(instance_url.into()),
            ..Self::default()
        }
    }

    /// Start an authenticated session, replacing any previous user state.
    pub fn begin(&mut self, token: String, profile: UserProfile, permissions: Vec<Permission>) {
        tracing::info!(
            user_login_id = %profile.user_login_id,
            permissions = permissions.len(),
            "session started"
        );
        self.token = Some(token);
        self.profile = Some(profile);
        self.permissions = permissions;
        self.selected_user = None;
    }

    /// Drop everything tied to the logged-in user.
    pub fn clear(&mut self) {
        if self.token.is_some() {
            tracing::info!("session cleared");
        }
        self.token = None;
        self.profile = None;
        self.permissions.clear();
        self.selected_user = None;
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn set_permissions(&mut self, permissions: Vec<Permission>) {
        self.permissions = permissions;
    }

    pub fn set_instance_url(&mut self, instance_url: impl Into<String>) {
        self.instance_url = Some(instance_url.into());
    }

    pub fn select_user(&mut self, user: SelectedUser) {
        self.selected_user = Some(user);
    }

    pub fn clear_selected_user(&mut self) {
        self.selected_user = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived accessors (read-only, infallible)
    // ─────────────────────────────────────────────────────────────────────

    /// True iff a non-empty token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// True iff both a token and a profile are present.
    pub fn is_user_authenticated(&self) -> bool {
        self.is_authenticated() && self.profile.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn selected_user(&self) -> Option<&SelectedUser> {
        self.selected_user.as_ref()
    }

    /// The stored per-instance value, ignoring any environment override.
    pub fn stored_instance_url(&self) -> Option<&str> {
        self.instance_url.as_deref()
    }

    /// Instance in effect: the override if set, else the stored value.
    pub fn instance_url(&self, env_override: Option<&str>) -> Option<String> {
        resolve_instance_url(env_override, self.stored_instance_url())
    }

    /// Resolved API origin; see [`resolve_base_url`].
    pub fn base_url(&self, env_override: Option<&str>) -> Option<String> {
        resolve_base_url(env_override, self.stored_instance_url())
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Distinct permission identifiers, for set-style lookups.
    pub fn permission_set(&self) -> HashSet<&str> {
        self.permissions.iter().map(Permission::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> UserProfile {
        serde_json::from_value(json!({"userLoginId": "hotwax.user", "partyId": "10010"})).unwrap()
    }

    fn selected() -> SelectedUser {
        serde_json::from_value(json!({"partyId": "10020"})).unwrap()
    }

    #[test]
    fn new_session_is_not_authenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(!session.is_user_authenticated());
        assert_eq!(session.token(), None);
        assert!(session.permissions().is_empty());
    }

    #[test]
    fn token_alone_authenticates_but_not_as_user() {
        let mut session = Session::new();
        session.set_token("abc");
        assert!(session.is_authenticated());
        assert!(!session.is_user_authenticated());
    }

    #[test]
    fn empty_token_does_not_authenticate() {
        let mut session = Session::new();
        session.set_token("");
        session.set_profile(profile());
        assert!(!session.is_authenticated());
        assert!(!session.is_user_authenticated());
    }

    #[test]
    fn profile_without_token_is_not_user_authenticated() {
        let mut session = Session::new();
        session.set_profile(profile());
        assert!(!session.is_user_authenticated());
    }

    #[test]
    fn begin_then_clear_keeps_instance() {
        let mut session = Session::with_instance_url("demo");
        session.select_user(selected());
        session.begin(
            "tok".to_string(),
            profile(),
            vec![Permission::new("COMMON_VIEW")],
        );

        assert!(session.is_user_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert!(session.selected_user().is_none());
        assert!(session.has_permission(&Permission::new("COMMON_VIEW")));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.profile().is_none());
        assert!(session.permissions().is_empty());
        assert_eq!(session.stored_instance_url(), Some("demo"));
        assert_eq!(
            session.base_url(None).as_deref(),
            Some("https://demo.hotwax.io/api/")
        );
    }

    #[test]
    fn selected_user_round_trip() {
        let mut session = Session::new();
        session.select_user(selected());
        assert_eq!(session.selected_user().map(|u| u.party_id.as_str()), Some("10020"));
        session.clear_selected_user();
        assert!(session.selected_user().is_none());
    }

    #[test]
    fn instance_url_prefers_override() {
        let session = Session::with_instance_url("demo");
        assert_eq!(session.instance_url(None).as_deref(), Some("demo"));
        assert_eq!(
            session.instance_url(Some("http://localhost:8080/")).as_deref(),
            Some("http://localhost:8080/")
        );
    }

    #[test]
    fn permission_set_collapses_duplicates() {
        let mut session = Session::new();
        session.set_permissions(vec![
            Permission::new("A"),
            Permission::new("B"),
            Permission::new("A"),
        ]);
        assert_eq!(session.permissions().len(), 3);
        assert_eq!(session.permission_set().len(), 2);
    }
}

//! The user-management service: one method per backend operation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use userdesk_auth::{PermissionFilter, Session, UserProfile};
use userdesk_core::error::require_non_blank;
use userdesk_parties::{
    ContactMechResult, DeletePartyContactMech, PartyEmailAddress, PartyTelecomNumber,
    ResetPassword, SetUserTimeZone, UpdatePartyGroup, UpdatePerson, UpdateUserLoginStatus,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::find::{FindQuery, FindResponse};
use crate::http::HttpClient;
use crate::permissions::{aggregate_permissions, PermissionFetch};
use crate::request::{ApiRequest, Auth};
use crate::response::{decode, ApiResponse};
use crate::types::{
    LoginRequest, LoginResponse, PermissionPageRequest, ServiceResponse, TimeZone,
    TimeZonesResponse,
};

/// Session handle shared between the service and its callers.
pub type SharedSession = Arc<RwLock<Session>>;

/// Result of [`UserService::login_and_load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub profile: UserProfile,
    pub permissions: PermissionFetch,
}

#[derive(Debug, Clone)]
pub struct UserService {
    http: HttpClient,
    session: SharedSession,
    config: Arc<ClientConfig>,
}

impl UserService {
    /// Build a service with a fresh session seeded from `config.instance`.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let session = match &config.instance {
            Some(instance) => Session::with_instance_url(instance.clone()),
            None => Session::new(),
        };
        Self::with_session(config, Arc::new(RwLock::new(session)))
    }

    /// Build a service around an existing session handle.
    pub fn with_session(config: ClientConfig, session: SharedSession) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(&config)?,
            session,
            config: Arc::new(config),
        })
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The resolved API origin for the current session.
    pub async fn base_url(&self) -> ClientResult<String> {
        self.session
            .read()
            .await
            .base_url(self.config.base_url_override.as_deref())
            .ok_or(ClientError::MissingBaseUrl)
    }

    /// Point the session at another instance. Cached responses belong to the
    /// old instance and are dropped.
    pub async fn set_instance_url(&self, instance: impl Into<String>) {
        self.session.write().await.set_instance_url(instance);
        self.http.cache().clear().await;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Plumbing
    // ─────────────────────────────────────────────────────────────────────

    async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        let (base_url, session_token) = {
            let session = self.session.read().await;
            let base_url = match &request.base_url {
                Some(url) => url.clone(),
                None => session
                    .base_url(self.config.base_url_override.as_deref())
                    .ok_or(ClientError::MissingBaseUrl)?,
            };
            (base_url, session.token().map(str::to_string))
        };

        let token = match &request.auth {
            Auth::Session => session_token,
            Auth::Bearer(token) => Some(token.clone()),
            Auth::Anonymous => None,
        };

        self.http.send(request, &base_url, token.as_deref()).await
    }

    /// Send and reject flagged bodies, returning the raw payload.
    async fn execute(&self, request: ApiRequest) -> ClientResult<Value> {
        let response = self.send(&request).await?;
        response.into_result().inspect_err(|e| {
            if let ClientError::Application { .. } = e {
                tracing::warn!(path = %request.path, "backend reported an error");
            }
        })
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        decode(self.execute(request).await?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authentication and profile
    // ─────────────────────────────────────────────────────────────────────

    /// Exchange credentials for a token. Does not touch the session.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        require_non_blank("username", username)?;
        require_non_blank("password", password)?;

        let request = ApiRequest::post("login")
            .anonymous()
            .json(&LoginRequest { username, password })?;
        self.call(request).await
    }

    /// Fetch the profile of the user owning `token`.
    pub async fn get_user_profile(&self, token: &str) -> ClientResult<UserProfile> {
        let base_url = self.base_url().await?;
        let request = ApiRequest::get("user-profile")
            .base_url(base_url)
            .bearer(token);
        self.call(request).await
    }

    /// Aggregate every permission matching `filter` for the user owning
    /// `token`. See [`aggregate_permissions`] for the paging rules.
    pub async fn get_user_permissions(
        &self,
        filter: &PermissionFilter,
        token: &str,
    ) -> ClientResult<PermissionFetch> {
        if filter.is_empty_selection() {
            return Ok(PermissionFetch::default());
        }

        let base_url = self.base_url().await?;
        let limits = self.config.page_limits();
        let view_size = limits.page_size;
        let permission_ids = filter.permission_ids();

        aggregate_permissions(filter, limits, |view_index| {
            let request = ApiRequest::post("getPermissions")
                .base_url(base_url.clone())
                .bearer(token)
                .json(&PermissionPageRequest {
                    view_index,
                    view_size,
                    permission_ids,
                });
            async move {
                let request = request?;
                self.send(&request).await
            }
        })
        .await
    }

    /// Full login: token, profile and permissions, then start the session.
    ///
    /// The session is only touched once every step has succeeded. Missing
    /// permission pages do not block the login; they are reported in the
    /// outcome.
    pub async fn login_and_load(
        &self,
        username: &str,
        password: &str,
        filter: &PermissionFilter,
    ) -> ClientResult<LoginOutcome> {
        let login = self.login(username, password).await?;
        let token = login
            .token
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::NotAuthenticated)?;

        let profile = self.get_user_profile(&token).await?;
        let permissions = self.get_user_permissions(filter, &token).await?;

        self.session
            .write()
            .await
            .begin(token, profile.clone(), permissions.permissions.clone());

        Ok(LoginOutcome {
            profile,
            permissions,
        })
    }

    /// End the session and drop cached responses.
    pub async fn logout(&self) {
        self.session.write().await.clear();
        self.http.cache().clear().await;
    }

    /// Re-fetch the profile for the current session token.
    pub async fn refresh_profile(&self) -> ClientResult<UserProfile> {
        let token = self.require_token().await?;
        let profile = self.get_user_profile(&token).await?;
        self.session.write().await.set_profile(profile.clone());
        Ok(profile)
    }

    async fn require_token(&self) -> ClientResult<String> {
        self.session
            .read()
            .await
            .token()
            .map(str::to_string)
            .ok_or(ClientError::NotAuthenticated)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Time zones
    // ─────────────────────────────────────────────────────────────────────

    pub async fn get_available_time_zones(&self) -> ClientResult<Vec<TimeZone>> {
        let request = ApiRequest::get("getAvailableTimeZones").cacheable();
        let resp: TimeZonesResponse = self.call(request).await?;
        Ok(resp.time_zones)
    }

    pub async fn set_user_time_zone(&self, payload: &SetUserTimeZone) -> ClientResult<ServiceResponse> {
        payload.validate()?;
        self.call(ApiRequest::post("setUserTimeZone").json(payload)?).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lookups (performFind)
    // ─────────────────────────────────────────────────────────────────────

    async fn perform_find<T: DeserializeOwned>(&self, query: &FindQuery) -> ClientResult<FindResponse<T>> {
        query.validate()?;
        self.call(ApiRequest::post("performFind").json(query)?).await
    }

    pub async fn fetch_users<T: DeserializeOwned>(&self, query: &FindQuery) -> ClientResult<FindResponse<T>> {
        self.perform_find(query).await
    }

    pub async fn get_user_login_details<T: DeserializeOwned>(
        &self,
        query: &FindQuery,
    ) -> ClientResult<FindResponse<T>> {
        self.perform_find(query).await
    }

    pub async fn get_user_contact_details<T: DeserializeOwned>(
        &self,
        query: &FindQuery,
    ) -> ClientResult<FindResponse<T>> {
        self.perform_find(query).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // User login services
    // ─────────────────────────────────────────────────────────────────────

    pub async fn reset_password(&self, payload: &ResetPassword) -> ClientResult<ServiceResponse> {
        payload.validate()?;
        self.call(ApiRequest::service("resetPassword").json(payload)?).await
    }

    pub async fn update_user_login_status(
        &self,
        payload: &UpdateUserLoginStatus,
    ) -> ClientResult<ServiceResponse> {
        self.call(ApiRequest::service("updateUserLoginStatus").json(payload)?).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Party services
    // ─────────────────────────────────────────────────────────────────────

    pub async fn create_update_party_email_address(
        &self,
        payload: &PartyEmailAddress,
    ) -> ClientResult<ContactMechResult> {
        payload.validate()?;
        self.call(ApiRequest::service("createUpdatePartyEmailAddress").json(payload)?)
            .await
    }

    pub async fn create_update_party_telecom_number(
        &self,
        payload: &PartyTelecomNumber,
    ) -> ClientResult<ContactMechResult> {
        payload.validate()?;
        self.call(ApiRequest::service("createUpdatePartyTelecomNumber").json(payload)?)
            .await
    }

    pub async fn delete_party_contact_mech(
        &self,
        payload: &DeletePartyContactMech,
    ) -> ClientResult<ServiceResponse> {
        self.call(ApiRequest::service("deletePartyContactMech").json(payload)?).await
    }

    pub async fn update_party_group(&self, payload: &UpdatePartyGroup) -> ClientResult<ServiceResponse> {
        payload.validate()?;
        self.call(ApiRequest::service("updatePartyGroup").json(payload)?).await
    }

    pub async fn update_person(&self, payload: &UpdatePerson) -> ClientResult<ServiceResponse> {
        payload.validate()?;
        self.call(ApiRequest::service("updatePerson").json(payload)?).await
    }
}

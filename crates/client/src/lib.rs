//! `userdesk-client`
//!
//! **Responsibility:** typed access to the user-management backend.
//!
//! This crate provides:
//! - One method per backend operation on [`UserService`]
//! - Bounded, paginated permission aggregation with explicit partial-failure reporting
//! - The login/logout lifecycle of the shared [`Session`](userdesk_auth::Session)
//! - A small TTL cache for responses the backend marks as cacheable

pub mod cache;
pub mod config;
pub mod error;
pub mod find;
pub mod http;
pub mod permissions;
pub mod request;
pub mod response;
pub mod service;
pub mod types;

pub use cache::ResponseCache;
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use find::{FindQuery, FindResponse};
pub use http::HttpClient;
pub use permissions::{
    PageFailure, PageLimits, PermissionFetch, DEFAULT_PERMISSION_CONCURRENCY,
    DEFAULT_PERMISSION_MAX_PAGES, DEFAULT_PERMISSION_PAGE_SIZE,
};
pub use request::{ApiRequest, Auth, Method};
pub use response::{has_error, ApiResponse};
pub use service::{LoginOutcome, SharedSession, UserService};
pub use types::{LoginResponse, ServiceResponse, TimeZone};

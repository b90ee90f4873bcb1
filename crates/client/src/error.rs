use thiserror::Error;

use userdesk_core::DomainError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP succeeded but the payload carries the backend's error flag.
    #[error("application error: {payload}")]
    Application { payload: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("no base URL configured (set USERDESK_BASE_URL or an instance)")]
    MissingBaseUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Some permission pages were not merged; see `PermissionFetch`.
    #[error(
        "permission list incomplete: {failed_pages} failed page(s), {skipped_pages} skipped, {missing} row(s) missing{}",
        first_failure_note(.first_failure)
    )]
    IncompletePermissions {
        failed_pages: usize,
        skipped_pages: u64,
        missing: u64,
        first_failure: Option<String>,
    },
}

fn first_failure_note(first_failure: &Option<String>) -> String {
    match first_failure {
        Some(reason) => format!(" (first failure: {reason})"),
        None => String::new(),
    }
}

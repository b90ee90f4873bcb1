//! Paginated permission aggregation.
//!
//! Page 0 is fetched first; if the reported `count` exceeds what it returned,
//! the remaining pages are requested with at most [`PageLimits::concurrency`]
//! in flight and the successful ones are merged in page order. A failed
//! follow-up page never aborts the others: the result lists it in
//! [`PermissionFetch::failed_pages`] instead.
//!
//! The server's `count` is not trusted to size the fan-out. At most
//! [`PageLimits::max_pages`] follow-ups are issued; the rest are reported as
//! skipped.

use std::future::Future;

use futures::stream::{self, StreamExt};

use userdesk_auth::{Permission, PermissionFilter};

use crate::error::{ClientError, ClientResult};
use crate::response::{decode, ApiResponse};
use crate::types::PermissionPage;

pub const DEFAULT_PERMISSION_PAGE_SIZE: u32 = 200;
pub const DEFAULT_PERMISSION_MAX_PAGES: u32 = 50;
pub const DEFAULT_PERMISSION_CONCURRENCY: usize = 8;

/// Bounds on a single aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub page_size: u32,
    /// Most follow-up pages requested after page 0.
    pub max_pages: u32,
    /// Most follow-up requests in flight at once.
    pub concurrency: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PERMISSION_PAGE_SIZE,
            max_pages: DEFAULT_PERMISSION_MAX_PAGES,
            concurrency: DEFAULT_PERMISSION_CONCURRENCY,
        }
    }
}

impl PageLimits {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

/// A follow-up page that could not be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub view_index: u32,
    pub reason: String,
}

/// Outcome of an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionFetch {
    /// Identifiers in server order, page by page. Not de-duplicated.
    pub permissions: Vec<Permission>,
    pub failed_pages: Vec<PageFailure>,
    /// Follow-up pages never requested because they exceeded the page limit.
    pub skipped_pages: u64,
    /// Rows the server's `count` announced that were not merged.
    pub missing: u64,
}

impl PermissionFetch {
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty() && self.skipped_pages == 0 && self.missing == 0
    }

    /// Fail unless every announced row was merged.
    pub fn require_complete(self) -> ClientResult<Vec<Permission>> {
        if self.is_complete() {
            return Ok(self.permissions);
        }
        Err(ClientError::IncompletePermissions {
            failed_pages: self.failed_pages.len(),
            skipped_pages: self.skipped_pages,
            missing: self.missing,
            first_failure: self
                .failed_pages
                .first()
                .map(|f| format!("page {}: {}", f.view_index, f.reason)),
        })
    }
}

/// Number of pages still needed after `returned` of `total` rows arrived.
pub fn follow_up_pages(total: u64, returned: u64, page_size: u32) -> u64 {
    let remaining = total.saturating_sub(returned);
    if remaining == 0 || page_size == 0 {
        return 0;
    }
    remaining.div_ceil(u64::from(page_size))
}

/// Run the aggregation with `fetch_page(view_index)` as the page source.
///
/// Failure of page 0 (transport, status or error flag) fails the whole call.
pub async fn aggregate_permissions<F, Fut>(
    filter: &PermissionFilter,
    limits: PageLimits,
    fetch_page: F,
) -> ClientResult<PermissionFetch>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = ClientResult<ApiResponse>>,
{
    if filter.is_empty_selection() {
        return Ok(PermissionFetch::default());
    }

    let first = fetch_page(0).await?;
    if first.status != 200 {
        return Err(ClientError::Status {
            status: first.status,
            body: first.body.to_string(),
        });
    }
    let page: PermissionPage = decode(first.into_result()?)?;
    let total = page.count;
    let mut permissions = page.into_permissions().unwrap_or_default();
    if permissions.is_empty() {
        return Ok(PermissionFetch::default());
    }

    let returned = permissions.len() as u64;
    let pages = follow_up_pages(total.unwrap_or(returned), returned, limits.page_size);
    let requested = u32::try_from(pages.min(u64::from(limits.max_pages))).unwrap_or(limits.max_pages);
    let skipped_pages = pages - u64::from(requested);

    if skipped_pages > 0 {
        tracing::warn!(
            total = ?total,
            pages,
            max_pages = limits.max_pages,
            "permission count exceeds the page limit; skipping the excess"
        );
    }

    let mut failed_pages = Vec::new();
    if requested > 0 {
        tracing::debug!(total = ?total, returned, requested, "fetching remaining permission pages");

        let responses: Vec<_> = stream::iter(1..=requested)
            .map(|view_index| fetch_page(view_index))
            .buffered(limits.concurrency.max(1))
            .collect()
            .await;

        for (view_index, result) in (1..=requested).zip(responses) {
            match merge_page(result) {
                Ok(ids) => permissions.extend(ids),
                Err(reason) => failed_pages.push(PageFailure { view_index, reason }),
            }
        }
    }

    let fetch = PermissionFetch {
        missing: total.unwrap_or(0).saturating_sub(permissions.len() as u64),
        permissions,
        failed_pages,
        skipped_pages,
    };

    if !fetch.is_complete() {
        tracing::warn!(
            failed = fetch.failed_pages.len(),
            skipped = fetch.skipped_pages,
            missing = fetch.missing,
            merged = fetch.permissions.len(),
            "permission aggregation incomplete"
        );
    }

    Ok(fetch)
}

/// Accept a follow-up page only if it is a 200 without the error flag and
/// with a `docs` list.
fn merge_page(result: ClientResult<ApiResponse>) -> Result<Vec<Permission>, String> {
    let response = result.map_err(|e| e.to_string())?;
    if response.status != 200 {
        return Err(format!("unexpected status {}", response.status));
    }
    let body = response.into_result().map_err(|e| e.to_string())?;
    let page: PermissionPage = decode(body).map_err(|e| e.to_string())?;
    page.into_permissions()
        .ok_or_else(|| "response has no docs".to_string())
}

//! `userdesk-auth`: client-side session state and the read-only views over it.
//!
//! Nothing in this crate performs IO. The HTTP client owns a [`Session`] and
//! mutates it on login/logout; everything else reads it through the accessors.

pub mod authorize;
pub mod base_url;
pub mod permissions;
pub mod profile;
pub mod session;

pub use authorize::{authorize, authorize_all, AuthzError};
pub use base_url::{resolve_base_url, resolve_instance_url, HOSTED_API_HOST};
pub use permissions::{Permission, PermissionFilter};
pub use profile::{SelectedUser, UserProfile};
pub use session::Session;

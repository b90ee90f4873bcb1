use thiserror::Error;

use crate::{Permission, Session};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Check a permission against the session's aggregated permission set.
///
/// This only gates client-side behaviour; the backend enforces its own rules.
pub fn authorize(session: &Session, required: &Permission) -> Result<(), AuthzError> {
    if !session.is_user_authenticated() {
        return Err(AuthzError::NotAuthenticated);
    }

    if session.has_permission(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Like [`authorize`], requiring every listed permission. Reports the first
/// missing one.
pub fn authorize_all<'a, I>(session: &Session, required: I) -> Result<(), AuthzError>
where
    I: IntoIterator<Item = &'a Permission>,
{
    if !session.is_user_authenticated() {
        return Err(AuthzError::NotAuthenticated);
    }

    let granted = session.permission_set();
    match required.into_iter().find(|p| !granted.contains(p.as_str())) {
        Some(missing) => Err(AuthzError::Forbidden(missing.as_str().to_string())),
        None => Ok(()),
    }
}

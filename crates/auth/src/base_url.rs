//! Base-URL resolution.
//!
//! An explicit environment override wins over the stored instance value. A
//! value that already carries a scheme is used as-is; a bare instance name is
//! expanded into the hosted API URL.

/// Domain under which hosted instances expose their API.
pub const HOSTED_API_HOST: &str = "hotwax.io";

/// The instance value in effect, without any expansion.
///
/// Empty strings count as "not configured".
pub fn resolve_instance_url(env_override: Option<&str>, stored: Option<&str>) -> Option<String> {
    env_override
        .filter(|v| !v.is_empty())
        .or(stored.filter(|v| !v.is_empty()))
        .map(str::to_string)
}

/// The origin every relative API path is resolved against.
///
/// Returns `None` when neither an override nor an instance is configured.
pub fn resolve_base_url(env_override: Option<&str>, stored: Option<&str>) -> Option<String> {
    let raw = resolve_instance_url(env_override, stored)?;
    if raw.starts_with("http") {
        Some(raw)
    } else {
        Some(format!("https://{raw}.{HOSTED_API_HOST}/api/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn override_wins_over_stored_instance() {
        let url = resolve_base_url(Some("http://localhost:8080/api/"), Some("demo"));
        assert_eq!(url.as_deref(), Some("http://localhost:8080/api/"));
    }

    #[test]
    fn empty_override_falls_back_to_stored() {
        let url = resolve_base_url(Some(""), Some("demo"));
        assert_eq!(url.as_deref(), Some("https://demo.hotwax.io/api/"));
    }

    #[test]
    fn stored_url_with_scheme_is_unchanged() {
        let url = resolve_base_url(None, Some("https://oms.example.com/rest/"));
        assert_eq!(url.as_deref(), Some("https://oms.example.com/rest/"));
    }

    #[test]
    fn nothing_configured_yields_none() {
        assert_eq!(resolve_base_url(None, None), None);
        assert_eq!(resolve_base_url(Some(""), Some("")), None);
        assert_eq!(resolve_instance_url(None, None), None);
    }

    #[test]
    fn instance_url_is_not_expanded() {
        assert_eq!(resolve_instance_url(None, Some("demo")).as_deref(), Some("demo"));
        assert_eq!(
            resolve_instance_url(Some("https://x.test/api/"), Some("demo")).as_deref(),
            Some("https://x.test/api/")
        );
    }

    proptest! {
        #[test]
        fn bare_instance_matches_hosted_template(name in "[a-z][a-z0-9-]{0,30}") {
            prop_assume!(!name.starts_with("http"));
            let url = resolve_base_url(None, Some(&name)).unwrap();
            prop_assert_eq!(url, format!("https://{}.hotwax.io/api/", name));
        }

        #[test]
        fn explicit_override_is_returned_verbatim(
            host in "[a-z]{1,12}",
            port in 1u16..,
            path in "(/[a-z]{0,8}){0,3}",
            stored in proptest::option::of("[a-z]{1,12}"),
        ) {
            let override_url = format!("http://{host}:{port}{path}");
            let url = resolve_base_url(Some(&override_url), stored.as_deref()).unwrap();
            prop_assert_eq!(url, override_url);
        }
    }
}

//! Small helpers for client configuration values.
//!
//! Clients discover the hosted backend through `SUPABASE_URL` and
//! `SUPABASE_ANON_KEY`; these helpers normalize and sanity-check the raw
//! values before the auth gate and store adapter consume them.

/// Trim a textual option, mapping blank values to `None`.
#[must_use]
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Check whether a value looks like an HTTP(S) URL.
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_trims_and_drops_blank() {
        assert_eq!(
            normalize_text_option(Some("  value  ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
        assert_eq!(normalize_text_option(None), None);
    }

    #[test]
    fn is_http_url_accepts_both_schemes() {
        assert!(is_http_url("https://demo.supabase.co"));
        assert!(is_http_url("http://localhost:54321"));
        assert!(!is_http_url("demo.supabase.co"));
    }
}

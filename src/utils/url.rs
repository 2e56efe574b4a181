//! URL construction and validation.
//!
//! - [`with_query`] builds request URLs, skipping blank parameters
//! - [`validate_link_url`] vets upstream-supplied links before they become `href`s

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// Result of URL validation
#[derive(Debug, Clone, PartialEq)]
pub enum UrlValidation {
    /// URL is valid and safe to link to
    Valid(String),
    /// URL is invalid or unsafe
    Invalid(UrlValidationError),
}

/// Errors that can occur during URL validation.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlValidationError {
    /// URL is empty
    Empty,
    /// URL doesn't start with http:// or https://
    InvalidProtocol,
    /// URL has no host/domain
    NoHost,
}

/// Append query parameters to `base`.
///
/// Parameters whose value is `None` or blank after trimming are omitted
/// entirely. Keys and values are percent-encoded.
pub fn with_query(base: &str, params: &[(&str, Option<String>)]) -> String {
    let encoded: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref()?;
            if value.trim().is_empty() {
                return None;
            }
            Some(format!(
                "{}={}",
                utf8_percent_encode(key, NON_ALPHANUMERIC),
                utf8_percent_encode(value, NON_ALPHANUMERIC)
            ))
        })
        .collect();

    if encoded.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, encoded.join("&"))
    }
}

/// Validate a URL before rendering it as a link.
///
/// Checks:
/// 1. URL is not empty
/// 2. URL starts with http:// or https://
/// 3. URL has a valid host
pub fn validate_link_url(url: &str) -> UrlValidation {
    let url = url.trim();

    if url.is_empty() {
        return UrlValidation::Invalid(UrlValidationError::Empty);
    }

    let url_lower = url.to_lowercase();
    if !url_lower.starts_with("http://") && !url_lower.starts_with("https://") {
        return UrlValidation::Invalid(UrlValidationError::InvalidProtocol);
    }

    if extract_host(url).is_none() {
        return UrlValidation::Invalid(UrlValidationError::NoHost);
    }

    UrlValidation::Valid(url.to_string())
}

/// Extract host from a URL
fn extract_host(url: &str) -> Option<String> {
    let scheme_end = url.find("://")?;
    let without_protocol = &url[scheme_end + 3..];

    // Host ends at the first path, query or fragment delimiter
    let host_part = without_protocol
        .split(['/', '?', '#'])
        .next()?;
    let host = host_part.rsplit('@').next()?.split(':').next()?;

    if host.is_empty() {
        return None;
    }

    Some(host.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_skips_blank_values() {
        let url = with_query(
            "https://api.test/recipes",
            &[
                ("query", Some("stew".to_string())),
                ("includeIngredients", Some("   ".to_string())),
                ("cuisine", None),
                ("number", Some("5".to_string())),
            ],
        );
        assert_eq!(url, "https://api.test/recipes?query=stew&number=5");
    }

    #[test]
    fn test_with_query_encodes_values() {
        let url = with_query("/r", &[("query", Some("mac & cheese".to_string()))]);
        assert_eq!(url, "/r?query=mac%20%26%20cheese");
    }

    #[test]
    fn test_with_query_no_params() {
        assert_eq!(with_query("/r", &[("query", None)]), "/r");
    }

    #[test]
    fn test_valid_urls() {
        assert!(matches!(
            validate_link_url("https://www.example.com/recipes/1"),
            UrlValidation::Valid(_)
        ));
        assert!(matches!(
            validate_link_url("  http://foodblog.net  "),
            UrlValidation::Valid(ref u) if u == "http://foodblog.net"
        ));
    }

    #[test]
    fn test_invalid_urls() {
        assert_eq!(
            validate_link_url(""),
            UrlValidation::Invalid(UrlValidationError::Empty)
        );
        assert_eq!(
            validate_link_url("javascript:alert(1)"),
            UrlValidation::Invalid(UrlValidationError::InvalidProtocol)
        );
        assert_eq!(
            validate_link_url("https://"),
            UrlValidation::Invalid(UrlValidationError::NoHost)
        );
    }

    #[test]
    fn test_extract_host() {
        assert_eq!(
            extract_host("https://Example.com:8080/a"),
            Some("example.com".to_string())
        );
        assert_eq!(extract_host("https://?q=1"), None);
    }
}

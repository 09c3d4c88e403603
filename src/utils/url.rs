// src/utils/url.rs

//! URL manipulation utilities.

/// Remove a leading `scheme://` (or a bare `//`) from a URL.
///
/// # Examples
/// ```
/// use ark_resolver::utils::url::strip_protocol;
///
/// assert_eq!(
///     strip_protocol("https://gallica.bnf.fr/ark:/12148/btv1b53000321m"),
///     "gallica.bnf.fr/ark:/12148/btv1b53000321m"
/// );
/// ```
pub fn strip_protocol(url: &str) -> &str {
    let url = url.trim();
    if let Some(rest) = url.strip_prefix("//") {
        return rest;
    }
    if let Some(scheme_end) = url.find("://") {
        let scheme = &url[..scheme_end];
        if is_scheme(scheme) {
            return &url[scheme_end + 3..];
        }
    }
    url
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// First path-free segment of a URL once its protocol is stripped.
///
/// This is plain segment extraction: `www.gallica.bnf.fr` and `gallica.bnf.fr`
/// are different hosts here.
pub fn host_segment(url: &str) -> Option<&str> {
    strip_protocol(url)
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Whether the string parses as an absolute URL with a host.
pub fn is_url(url: &str) -> bool {
    ::url::Url::parse(url.trim())
        .map(|parsed| parsed.host_str().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_protocol() {
        assert_eq!(strip_protocol("http://example.com/a"), "example.com/a");
        assert_eq!(strip_protocol("//example.com/a"), "example.com/a");
        assert_eq!(strip_protocol("example.com/a"), "example.com/a");
    }

    #[test]
    fn test_strip_protocol_ignores_colons_in_path() {
        assert_eq!(
            strip_protocol("gallica.bnf.fr/ark:/12148/x"),
            "gallica.bnf.fr/ark:/12148/x"
        );
    }

    #[test]
    fn test_host_segment() {
        assert_eq!(
            host_segment("https://arca.irht.cnrs.fr/ark:/63955/md655d86p718"),
            Some("arca.irht.cnrs.fr")
        );
        assert_eq!(host_segment("https://example.com"), Some("example.com"));
        assert_eq!(host_segment("https:///path"), None);
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/foo"));
        assert!(!is_url("not a url"));
        assert!(!is_url("gallica.bnf.fr/ark:/12148/x"));
        assert!(!is_url("mailto:someone@example.com"));
    }
}

// src/services/resolver.rs

//! Identifier resolver.
//!
//! Classifies a URL by its host segment and pulls the provider's ARK out of
//! it. Pure string processing.

use crate::error::{AppError, Result};
use crate::models::{Identifier, ProviderTag};
use crate::utils::url::{is_url, strip_protocol};

/// Which provider a URL belongs to.
///
/// Returns `None` when the string is not a URL or its host is not a
/// registered provider domain. The host must equal the domain exactly and be
/// followed by a `/`; a bare host is not a record URL.
pub fn classify(url: &str) -> Option<ProviderTag> {
    if !is_url(url) {
        return None;
    }
    let (host, _) = strip_protocol(url).split_once('/')?;
    ProviderTag::ALL
        .into_iter()
        .find(|provider| provider.domain() == host)
}

/// Whether a URL belongs to the given provider.
pub fn is_match(url: &str, provider: ProviderTag) -> bool {
    classify(url) == Some(provider)
}

/// Extract the provider's identifier from a URL.
///
/// The protocol and `"<domain>/"` are stripped; what remains must start with
/// the provider's ARK prefix.
pub fn extract_identifier(url: &str, provider: ProviderTag) -> Result<Identifier> {
    let stripped = strip_protocol(url);
    let remainder = stripped
        .strip_prefix(provider.domain())
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(stripped);
    Identifier::new(provider, remainder)
}

/// Check that an identifier handed to a provider client is one of its own.
pub(crate) fn ensure_provider(identifier: &Identifier, provider: ProviderTag) -> Result<&str> {
    let value = identifier.as_str();
    if identifier.provider() != provider || !value.starts_with(provider.ark_prefix()) {
        return Err(AppError::invalid_identifier(provider, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GALLICA_URL: &str = "https://gallica.bnf.fr/ark:/12148/btv1b53000321m";
    const IRHT_URL: &str = "https://arca.irht.cnrs.fr/ark:/63955/md655d86p718";

    #[test]
    fn test_classify_known_providers() {
        assert_eq!(classify(GALLICA_URL), Some(ProviderTag::Gallica));
        assert_eq!(classify(IRHT_URL), Some(ProviderTag::Irht));
        assert_eq!(classify("http://gallica.bnf.fr/ark:/12148/x"), Some(ProviderTag::Gallica));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("https://example.com/foo"), None);
        assert_eq!(classify("not a url"), None);
        assert_eq!(classify("gallica.bnf.fr/ark:/12148/btv1b53000321m"), None);
    }

    #[test]
    fn test_classify_requires_exact_host() {
        assert_eq!(classify("https://www.gallica.bnf.fr/ark:/12148/x"), None);
        assert_eq!(classify("https://irht.cnrs.fr/ark:/63955/x"), None);
    }

    #[test]
    fn test_classify_bare_host_is_unknown() {
        assert_eq!(classify("https://gallica.bnf.fr"), None);
        assert_eq!(classify("https://arca.irht.cnrs.fr"), None);
        assert!(!is_match("https://gallica.bnf.fr", ProviderTag::Gallica));
        assert_eq!(classify("https://gallica.bnf.fr/"), Some(ProviderTag::Gallica));
    }

    #[test]
    fn test_is_match() {
        assert!(is_match(GALLICA_URL, ProviderTag::Gallica));
        assert!(!is_match(GALLICA_URL, ProviderTag::Irht));
        assert!(is_match(IRHT_URL, ProviderTag::Irht));
    }

    #[test]
    fn test_extract_identifier() {
        let id = extract_identifier(GALLICA_URL, ProviderTag::Gallica).unwrap();
        assert_eq!(id.as_str(), "ark:/12148/btv1b53000321m");

        let id = extract_identifier(IRHT_URL, ProviderTag::Irht).unwrap();
        assert_eq!(id.as_str(), "ark:/63955/md655d86p718");
    }

    #[test]
    fn test_extract_identifier_rejects_other_schemes() {
        let err = extract_identifier("https://gallica.bnf.fr/services/engine", ProviderTag::Gallica)
            .unwrap_err();
        match err {
            AppError::InvalidIdentifier { provider, value } => {
                assert_eq!(provider, ProviderTag::Gallica);
                assert_eq!(value, "services/engine");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_identifier_wrong_provider() {
        assert!(matches!(
            extract_identifier(GALLICA_URL, ProviderTag::Irht),
            Err(AppError::InvalidIdentifier {
                provider: ProviderTag::Irht,
                ..
            })
        ));
    }

    #[test]
    fn test_gallica_extraction_outcomes() {
        let urls = [
            GALLICA_URL,
            "https://gallica.bnf.fr/ark:/12148/bpt6k1234/f1.item",
            "https://gallica.bnf.fr/",
            "https://gallica.bnf.fr/accueil/fr/content/accueil-fr",
        ];
        for url in urls {
            assert_eq!(classify(url), Some(ProviderTag::Gallica));
            match extract_identifier(url, ProviderTag::Gallica) {
                Ok(id) => assert!(id.as_str().starts_with("ark:/12148/")),
                Err(AppError::InvalidIdentifier { .. }) => {}
                Err(other) => panic!("unexpected error for {url}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_ensure_provider() {
        let id = Identifier::new(ProviderTag::Irht, "ark:/63955/x").unwrap();
        assert_eq!(ensure_provider(&id, ProviderTag::Irht).unwrap(), "ark:/63955/x");
        assert!(ensure_provider(&id, ProviderTag::Gallica).is_err());
    }
}

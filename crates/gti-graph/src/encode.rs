//! Canonical identifiers for URL entities.
//!
//! The graph API keys URL objects by the unpadded URL-safe base64 encoding of
//! the URL string. No normalization is applied: the bytes given are the bytes
//! encoded.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use gti_core::EntityId;

/// Derive the API identifier of a URL entity.
pub fn url_id(raw_url: &str) -> EntityId {
    EntityId(URL_SAFE_NO_PAD.encode(raw_url.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            url_id("http://www.example.com/").as_str(),
            "aHR0cDovL3d3dy5leGFtcGxlLmNvbS8"
        );
        // `_` and `-` replace `/` and `+`; no `=` padding.
        assert_eq!(url_id("http://a.b/?>>>").as_str(), "aHR0cDovL2EuYi8_Pj4-");
        assert_eq!(
            url_id("https://www.virustotal.com/gui/home?a=1&b=~x").as_str(),
            "aHR0cHM6Ly93d3cudmlydXN0b3RhbC5jb20vZ3VpL2hvbWU_YT0xJmI9fng"
        );
    }

    #[test]
    fn test_deterministic() {
        let url = "https://example.org/path?q=1";
        assert_eq!(url_id(url), url_id(url));
    }

    #[test]
    fn test_no_local_normalization() {
        let variants = [
            "http://example.com",
            "http://example.com/",
            "HTTP://EXAMPLE.COM/",
            "http://example.com/?b=2&a=1",
            "http://example.com/?a=1&b=2",
        ];
        let ids: std::collections::HashSet<_> = variants.iter().map(|u| url_id(u)).collect();
        assert_eq!(ids.len(), variants.len());
    }

    #[test]
    fn test_output_is_url_safe() {
        let id = url_id("http://host/\u{00ff}\u{00fe}?x=+/+/");
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}

//! Manifest serialization and content fingerprints
//!
//! The payload is the exact byte string that gets hashed, mirrored to disk,
//! emitted into the bundle and served by the dev route.

use crate::errors::ManifestError;
use crate::types::Manifest;
use sha1::{Digest, Sha1};

/// Pretty-printed JSON with a single trailing newline
pub fn to_payload(manifest: &Manifest) -> Result<String, ManifestError> {
    let mut payload = serde_json::to_string_pretty(manifest)?;
    payload.push('\n');
    Ok(payload)
}

/// Weak validator for a payload: `W/"<sha1-hex>"`
pub fn etag(payload: &str) -> String {
    let digest = Sha1::digest(payload.as_bytes());
    format!("W/\"{}\"", hex::encode(digest))
}

/// A serialized manifest paired with its fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub body: String,
    pub etag: String,
}

impl Payload {
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, ManifestError> {
        let body = to_payload(manifest)?;
        let etag = etag(&body);
        Ok(Payload { body, etag })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Manifest {
        let mut manifest = Manifest::new();
        manifest.insert("name", "My App");
        manifest.insert("icons", json!([{ "src": "/a.png", "sizes": "48x48" }]));
        manifest
    }

    #[test]
    fn test_payload_format() {
        let payload = to_payload(&sample()).unwrap_or_default();
        let expected = "{\n  \"name\": \"My App\",\n  \"icons\": [\n    {\n      \"src\": \"/a.png\",\n      \"sizes\": \"48x48\"\n    }\n  ]\n}\n";
        assert_eq!(payload, expected);
        assert!(!payload.ends_with("\n\n"));
    }

    #[test]
    fn test_payload_is_deterministic() {
        let first = to_payload(&sample()).unwrap_or_default();
        let second = to_payload(&sample()).unwrap_or_default();
        assert_eq!(first, second);
        assert_eq!(etag(&first), etag(&second));
    }

    #[test]
    fn test_payload_parses_back() {
        let manifest = sample();
        let payload = to_payload(&manifest).unwrap_or_default();
        let parsed: Result<Manifest, _> = serde_json::from_str(&payload);
        assert!(parsed.is_ok_and(|p| p == manifest));
    }

    #[test]
    fn test_etag_format() {
        // sha1("") = da39a3ee5e6b4b0d3255bfef95601890afd80709
        assert_eq!(etag(""), "W/\"da39a3ee5e6b4b0d3255bfef95601890afd80709\"");
        assert_eq!(etag("{}\n").len(), 44);
    }

    #[test]
    fn test_etag_changes_with_content() {
        assert_ne!(etag("{\"a\":1}\n"), etag("{\"a\":2}\n"));
        assert_ne!(etag("{}\n"), etag("{} \n"));
    }

    #[test]
    fn test_payload_struct_matches_functions() {
        let manifest = sample();
        let payload = Payload::from_manifest(&manifest);
        assert!(payload.is_ok());
        let Ok(payload) = payload else {
            return;
        };
        assert_eq!(payload.body, to_payload(&manifest).unwrap_or_default());
        assert_eq!(payload.etag, etag(&payload.body));
    }
}

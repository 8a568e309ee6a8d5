//! Response sanitization.
//!
//! Decoded API payloads are cleaned before they leave the access layer:
//! verbose or internal fields are dropped, sensitive fields are masked, and
//! containers left empty are pruned. The transform is total over JSON values
//! and idempotent.

use serde_json::{Map, Value};

/// Replacement value for masked fields.
pub const REDACTED: &str = "[REDACTED]";

/// Per-engine scan tables and the API's self-link bookkeeping.
const DEFAULT_DROP_KEYS: &[&str] = &["last_analysis_results", "links"];

/// Field-level cleaning rules.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    drop_keys: Vec<String>,
    redact_keys: Vec<String>,
    prune_empty: bool,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            drop_keys: DEFAULT_DROP_KEYS.iter().map(|k| k.to_string()).collect(),
            redact_keys: Vec::new(),
            prune_empty: true,
        }
    }
}

impl Sanitizer {
    /// Additionally drop fields named `key`.
    pub fn drop_key(mut self, key: impl Into<String>) -> Self {
        self.drop_keys.push(key.into());
        self
    }

    /// Mask the value of fields named `key` with [`REDACTED`].
    pub fn redact_key(mut self, key: impl Into<String>) -> Self {
        self.redact_keys.push(key.into());
        self
    }

    /// Keep empty maps and arrays instead of pruning them.
    pub fn keep_empty(mut self) -> Self {
        self.prune_empty = false;
        self
    }

    /// Clean `payload`. The top-level value itself is never removed.
    pub fn sanitize(&self, payload: Value) -> Value {
        match payload {
            Value::Object(map) => Value::Object(self.clean_map(map)),
            Value::Array(items) => Value::Array(self.clean_array(items)),
            scalar => scalar,
        }
    }

    fn clean_map(&self, map: Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            if self.drop_keys.iter().any(|k| *k == key) {
                continue;
            }
            if self.redact_keys.iter().any(|k| *k == key) {
                out.insert(key, Value::String(REDACTED.to_string()));
                continue;
            }
            let value = self.sanitize(value);
            if self.prune_empty && is_empty_container(&value) {
                continue;
            }
            out.insert(key, value);
        }
        out
    }

    fn clean_array(&self, items: Vec<Value>) -> Vec<Value> {
        items
            .into_iter()
            .map(|item| self.sanitize(item))
            .filter(|item| !(self.prune_empty && is_empty_container(item)))
            .collect()
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Clean `payload` with the default rules.
pub fn sanitize(payload: Value) -> Value {
    Sanitizer::default().sanitize(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_file_object() -> Value {
        json!({
            "type": "file",
            "id": "44d88612fea8a8f36de82e1278abb02f",
            "links": {"self": "https://example.invalid/api/v3/files/44d8"},
            "attributes": {
                "meaningful_name": "eicar.com",
                "last_analysis_stats": {"malicious": 60, "undetected": 5},
                "last_analysis_results": {
                    "EngineA": {"category": "malicious", "result": "EICAR"},
                    "EngineB": {"category": "undetected", "result": null}
                },
                "tags": [],
                "names": ["eicar.com", "eicar.txt"],
                "size": 68,
                "reputation": 0,
                "trid": [{}],
                "crowdsourced_yara_results": null
            },
            "relationships": {
                "contacted_domains": {
                    "data": [{"type": "domain", "id": "example.com"}],
                    "links": {"self": "https://example.invalid/..."},
                    "meta": {}
                }
            }
        })
    }

    #[test]
    fn test_drops_scan_tables_and_links() {
        let cleaned = sanitize(sample_file_object());
        let attrs = &cleaned["attributes"];
        assert!(attrs.get("last_analysis_results").is_none());
        assert!(cleaned.get("links").is_none());
        assert!(cleaned["relationships"]["contacted_domains"]
            .get("links")
            .is_none());
        assert_eq!(attrs["last_analysis_stats"]["malicious"], 60);
    }

    #[test]
    fn test_prunes_empty_containers_but_keeps_scalars() {
        let cleaned = sanitize(sample_file_object());
        let attrs = &cleaned["attributes"];
        assert!(attrs.get("tags").is_none());
        assert!(attrs.get("trid").is_none());
        assert!(cleaned["relationships"]["contacted_domains"]
            .get("meta")
            .is_none());
        // Falsy scalars and nulls are values, not containers.
        assert_eq!(attrs["reputation"], 0);
        assert_eq!(attrs["crowdsourced_yara_results"], Value::Null);
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize(sample_file_object());
        let twice = sanitize(once.clone());
        assert_eq!(once, twice);

        let strict = Sanitizer::default().redact_key("rules");
        let payload = json!({"rules": "rule x { condition: true }", "nested": [{"rules": 1}]});
        let once = strict.sanitize(payload);
        assert_eq!(strict.sanitize(once.clone()), once);
        assert_eq!(once["rules"], REDACTED);
        assert_eq!(once["nested"][0]["rules"], REDACTED);
    }

    #[test]
    fn test_preserves_key_order() {
        let payload = json!({"zeta": 1, "alpha": 2, "links": {}, "mid": 3});
        let cleaned = sanitize(payload);
        let keys: Vec<&str> = cleaned
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_scalars_and_top_level_containers_pass_through() {
        assert_eq!(sanitize(json!("text")), json!("text"));
        assert_eq!(sanitize(json!(42)), json!(42));
        assert_eq!(sanitize(Value::Null), Value::Null);
        assert_eq!(sanitize(json!({})), json!({}));
        assert_eq!(sanitize(json!([])), json!([]));
        assert_eq!(sanitize(json!([[], {}])), json!([]));
    }

    #[test]
    fn test_keep_empty_and_extra_drop_keys() {
        let sanitizer = Sanitizer::default().keep_empty().drop_key("sigma_analysis_results");
        let cleaned = sanitizer.sanitize(json!({"tags": [], "sigma_analysis_results": [1]}));
        assert_eq!(cleaned, json!({"tags": []}));
    }
}

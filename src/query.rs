//! Query parameters for Graph API requests.
//!
//! Values that are missing or empty never reach the wire: `None`, `""`,
//! empty lists, `null` and empty JSON containers are all dropped.

use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.params.insert(key.to_string(), value);
        }
        self
    }

    pub fn opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Comma-joined list, the form Graph uses for `fields` and `breakdowns`.
    pub fn list<S: AsRef<str>>(self, key: &str, values: &[S]) -> Self {
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        self.param(key, joined)
    }

    /// JSON-encoded value, used for arrays and nested objects.
    pub fn json(self, key: &str, value: &Value) -> Self {
        let empty = match value {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::String(s) => s.is_empty(),
            _ => false,
        };
        if empty {
            self
        } else {
            self.param(key, value.to_string())
        }
    }

    pub fn set_default(&mut self, key: &str, value: impl ToString) {
        if !self.params.contains_key(key) {
            let value = value.to_string();
            if !value.is_empty() {
                self.params.insert(key.to_string(), value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drops_nil_and_empty_values() {
        let query = Query::new()
            .param("name", "")
            .opt::<String>("level", None)
            .list::<&str>("breakdowns", &[])
            .json("time_range", &Value::Null)
            .json("effective_status", &json!([]))
            .json("promoted_object", &json!({}));
        assert!(query.is_empty());
    }

    #[test]
    fn keeps_present_values() {
        let query = Query::new()
            .param("limit", 100)
            .opt("level", Some("adset"))
            .list("fields", &["spend", "", "clicks"])
            .json("effective_status", &json!(["ACTIVE"]))
            .json("time_range", &json!({"since": "2024-01-01", "until": "2024-01-31"}));

        assert_eq!(query.len(), 5);
        assert_eq!(query.get("limit"), Some("100"));
        assert_eq!(query.get("level"), Some("adset"));
        assert_eq!(query.get("fields"), Some("spend,clicks"));
        assert_eq!(query.get("effective_status"), Some(r#"["ACTIVE"]"#));
        assert_eq!(
            query.get("time_range"),
            Some(r#"{"since":"2024-01-01","until":"2024-01-31"}"#)
        );
    }

    #[test]
    fn set_default_does_not_override() {
        let mut query = Query::new().param("limit", 25);
        query.set_default("limit", 100);
        query.set_default("fields", "id,name");
        assert_eq!(query.get("limit"), Some("25"));
        assert_eq!(query.get("fields"), Some("id,name"));
    }

    #[test]
    fn pairs_are_sorted_by_key() {
        let query = Query::new().param("b", 2).param("a", 1);
        assert_eq!(
            query.pairs(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }
}

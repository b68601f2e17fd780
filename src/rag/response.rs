//! Wire payloads for the query endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /rag/query`.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    /// Backend permission-group identifier for the active silo.
    pub role: &'a str,
    /// The user prompt.
    pub query: &'a str,
}

/// Normalized result of a query exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// Full answer text.
    pub answer: String,
    /// Ordered citation strings backing the answer.
    pub sources: Vec<String>,
}

impl QueryAnswer {
    /// Decode a success body leniently.
    ///
    /// A missing or non-string `answer` becomes an empty string; a
    /// missing or non-array `sources` becomes an empty list, and
    /// non-string entries are skipped. Availability over strictness: a
    /// malformed success body never fails the exchange.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let answer = value
            .get("answer")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let sources = value
            .get("sources")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        Self { answer, sources }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_full_body() {
        let body = json!({"answer": "Q3 revenue rose 4%", "sources": ["fin_q3.pdf", "audit.md"]});
        let answer = QueryAnswer::from_value(&body);
        assert_eq!(answer.answer, "Q3 revenue rose 4%");
        assert_eq!(answer.sources, vec!["fin_q3.pdf", "audit.md"]);
    }

    #[test]
    fn test_decode_missing_sources() {
        let body = json!({"answer": "ok"});
        let answer = QueryAnswer::from_value(&body);
        assert_eq!(answer.answer, "ok");
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn test_decode_missing_answer() {
        let body = json!({"sources": ["a"]});
        let answer = QueryAnswer::from_value(&body);
        assert_eq!(answer.answer, "");
        assert_eq!(answer.sources, vec!["a"]);
    }

    #[test]
    fn test_decode_skips_non_string_sources() {
        let body = json!({"answer": "ok", "sources": ["a", 7, null, "b"]});
        let answer = QueryAnswer::from_value(&body);
        assert_eq!(answer.sources, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_tolerates_non_object_body() {
        let answer = QueryAnswer::from_value(&json!("not an object"));
        assert_eq!(answer, QueryAnswer::default());
    }

    #[test]
    fn test_request_serialization() {
        let request = QueryRequest {
            role: "Finance_Team",
            query: "quarterly spend",
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"role": "Finance_Team", "query": "quarterly spend"}));
    }
}

//! Request body extraction
//!
//! axum's `Json` rejects requests without `content-type: application/json`
//! and answers with plain-text errors. Clients of this API send bare bodies
//! (or none at all) and expect `{"error": "..."}` back, so bodies go through
//! `JsonBody` instead.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{Result, TaskError};

/// JSON request body. An empty body reads as `{}`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = TaskError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| TaskError::invalid_json())?;
        parse_body(&bytes).map(JsonBody)
    }
}

pub fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        bytes
    };

    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        // Well-formed JSON of the wrong shape
        Category::Data => TaskError::validation(format!("Invalid request body: {e}")),
        Category::Io | Category::Syntax | Category::Eof => TaskError::invalid_json(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Body {
        #[serde(default)]
        title: Option<String>,
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(parse_body::<Body>(b"").unwrap(), Body { title: None });
        assert_eq!(parse_body::<Body>(b"  \n").unwrap(), Body { title: None });
    }

    #[test]
    fn test_syntax_errors_are_invalid_json() {
        for raw in [&b"{"[..], b"{title: 1}", b"not json", b"{\"title\": \"x\"} trailing"] {
            let err = parse_body::<Body>(raw).unwrap_err();
            assert!(
                matches!(err, TaskError::MalformedRequest(ref msg) if msg == "Invalid JSON"),
                "{:?}",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn test_wrong_shape_is_validation_error() {
        let err = parse_body::<Body>(br#"{"title": 42}"#).unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));

        let err = parse_body::<Body>(br#""just a string""#).unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
    }
}

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

const ERRORS_KEY: &str = "errors";

#[derive(Deserialize, Debug, Default)]
struct ApiErrorEntry {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: i64,
}

/// Decodes a response body.
///
/// An empty body means "no content" and yields `None`. A JSON value carrying
/// a top-level `errors` array is turned into [`Error::Api`] built from the
/// first listed error; an `errors` member of any other type is ordinary payload.
pub fn decode_response(body: &str) -> Result<Option<Value>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body)?;
    if let Some(Value::Array(errors)) = value.get(ERRORS_KEY) {
        return Err(api_error(errors));
    }
    Ok(Some(value))
}

fn api_error(errors: &[Value]) -> Error {
    let entry = errors
        .first()
        .and_then(|first| ApiErrorEntry::deserialize(first).ok())
        .unwrap_or_default();
    Error::Api {
        code: entry.code,
        message: entry.message,
    }
}

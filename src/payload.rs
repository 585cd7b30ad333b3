//! Payload composition for free-form user input.

use serde_json::{Map, Value};

/// Key used when wrapping text that is not valid JSON.
pub const PAYLOAD_KEY: &str = "payload";

/// Turns user-entered text into a JSON value ready for
/// [`crate::ConnectionManager::emit`].
///
/// Valid JSON is returned as parsed. Anything else is wrapped as
/// `{"payload": text}` with the text untouched.
///
/// ```
/// use serde_json::json;
/// use socket_monitor::compose_payload;
///
/// assert_eq!(compose_payload(r#"{"a":1}"#), json!({ "a": 1 }));
/// assert_eq!(compose_payload("hello"), json!({ "payload": "hello" }));
/// ```
#[must_use]
pub fn compose_payload(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| {
        let mut wrapped = Map::new();
        wrapped.insert(PAYLOAD_KEY.to_owned(), Value::String(text.to_owned()));
        Value::Object(wrapped)
    })
}

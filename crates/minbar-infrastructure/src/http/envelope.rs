//! Response-shape normalization.
//!
//! The backend is inconsistent about envelopes: the same endpoint may
//! return a bare JSON array/object or wrap it as `{"data": ...}` depending
//! on version. Rather than repeating the defensive unwrapping at every
//! call site, it lives here and the rest of the client only ever sees the
//! inner payload.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Peel a `{"data": ...}` envelope if present, otherwise pass the value
/// through unchanged.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Read a list payload. A non-array shape yields an empty list, and a
/// single unreadable element is skipped rather than poisoning the rest of
/// the page.
pub fn parse_list<T: DeserializeOwned>(endpoint: &str, value: Value) -> Vec<T> {
    match unwrap_envelope(value) {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<T>(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Skipping malformed record from {}: {}", endpoint, e);
                    None
                }
            })
            .collect(),
        other => {
            if !other.is_null() {
                warn!("Expected an array from {}, got {:?}", endpoint, other);
            }
            Vec::new()
        }
    }
}

/// Read a single-object payload; `None` when the shape does not fit.
pub fn parse_object<T: DeserializeOwned>(endpoint: &str, value: Value) -> Option<T> {
    match serde_json::from_value::<T>(unwrap_envelope(value)) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Unreadable object from {}: {}", endpoint, e);
            None
        }
    }
}

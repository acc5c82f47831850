use crate::error::{Result, SdkError};
use serde_json::{Map, Value};

/// Opaque continuation token extracted from a list response.
///
/// Never interpreted beyond re-serialization into the next request's query
/// parameters, which *replace* the prior query entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Full or partial URL carrying the follow-up query (`nextLink`).
    Link(String),
    /// Bare continuation token (`nextCursor`), re-submitted as `cursor`.
    Token(String),
}

impl Cursor {
    /// Derive the complete query for the next request.
    pub fn into_query(self) -> Vec<(String, String)> {
        match self {
            Self::Link(link) => {
                let raw = match link.split_once('?') {
                    Some((_, query)) => query,
                    None => link.as_str(),
                };
                url::form_urlencoded::parse(raw.as_bytes())
                    .into_owned()
                    .collect()
            }
            Self::Token(token) => vec![("cursor".to_string(), token)],
        }
    }
}

/// One decoded list response: raw items plus the continuation, if any.
#[derive(Debug)]
pub(crate) struct ListEnvelope {
    pub items: Vec<Value>,
    pub cursor: Option<Cursor>,
}

impl ListEnvelope {
    /// Decode the platform's list envelope shapes: an items array under
    /// `value`, a direct `items` array, a nested `{resource: {items}}`
    /// wrapper, or a bare top-level array.
    pub fn parse(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self {
                items,
                cursor: None,
            }),
            Value::Object(mut map) => {
                let mut cursor = take_cursor(&mut map);

                if let Some(items) = take_items(&mut map, "value")? {
                    return Ok(Self { items, cursor });
                }
                if let Some(items) = take_items(&mut map, "items")? {
                    return Ok(Self { items, cursor });
                }

                // Single resource key wrapping its own items array.
                if map.len() == 1 {
                    let (_, inner) = map.into_iter().next().unwrap_or_default();
                    if let Value::Object(mut inner) = inner {
                        if cursor.is_none() {
                            cursor = take_cursor(&mut inner);
                        }
                        if let Some(items) = take_items(&mut inner, "items")? {
                            return Ok(Self { items, cursor });
                        }
                    }
                }

                Err(SdkError::InvalidResponse(
                    "list envelope carries no items array".into(),
                ))
            }
            other => Err(SdkError::InvalidResponse(format!(
                "expected a list envelope, got {other}"
            ))),
        }
    }
}

fn take_items(map: &mut Map<String, Value>, key: &str) -> Result<Option<Vec<Value>>> {
    match map.remove(key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(SdkError::InvalidResponse(format!(
            "`{key}` is not an array: {other}"
        ))),
    }
}

fn take_cursor(map: &mut Map<String, Value>) -> Option<Cursor> {
    if let Some(Value::String(link)) = map.remove("nextLink") {
        if !link.is_empty() {
            return Some(Cursor::Link(link));
        }
    }
    if let Some(Value::String(token)) = map.remove("nextCursor") {
        if !token.is_empty() {
            return Some(Cursor::Token(token));
        }
    }
    None
}

//! Projection of a Books API `volumes` response into plain items.
//!
//! Only the fields the list needs are read. Everything else in the payload is ignored.

use serde_json::Value;

use crate::config::ParsePolicy;

/// A `volumeInfo` entry before its thumbnail has been downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,
    pub preview_link: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("response is not valid JSON: {0}")]
    Json(String),
    #[error("response has no `items` array")]
    MissingItems,
    #[error("item {index}: {reason}")]
    Item { index: usize, reason: String },
}

/// Parses a non-blank response body.
///
/// Under [`ParsePolicy::Strict`] the first malformed item fails the whole response.
/// Under [`ParsePolicy::Lenient`] malformed items are logged and skipped.
pub fn parse_volumes(body: &str, policy: ParsePolicy) -> Result<Vec<Volume>, VolumeError> {
    let root: Value = serde_json::from_str(body).map_err(|err| VolumeError::Json(err.to_string()))?;
    let items = root
        .get("items")
        .and_then(Value::as_array)
        .ok_or(VolumeError::MissingItems)?;

    let mut volumes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match parse_item(item, policy) {
            Ok(volume) => volumes.push(volume),
            Err(reason) => match policy {
                ParsePolicy::Strict => return Err(VolumeError::Item { index, reason }),
                ParsePolicy::Lenient => {
                    tracing::warn!(index, %reason, "skipping malformed item");
                }
            },
        }
    }
    Ok(volumes)
}

fn parse_item(item: &Value, policy: ParsePolicy) -> Result<Volume, String> {
    let info = item
        .get("volumeInfo")
        .filter(|v| v.is_object())
        .ok_or_else(|| "missing `volumeInfo` object".to_owned())?;

    let title = required_str(info, "title")?;
    let description = required_str(info, "description")?;
    let preview_link = required_str(info, "previewLink")?;
    if title.is_empty() {
        return Err("empty `title`".to_owned());
    }
    if preview_link.is_empty() {
        return Err("empty `previewLink`".to_owned());
    }

    let authors = match info.get("authors") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .map(scalar_text)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err("`authors` is not an array".to_owned()),
    };

    let thumbnail_url = match (info.get("imageLinks"), policy) {
        (Some(links), _) if links.is_object() => match required_str(links, "smallThumbnail") {
            Ok(url) => Some(url),
            Err(reason) if policy == ParsePolicy::Strict => return Err(reason),
            Err(_) => None,
        },
        (_, ParsePolicy::Strict) => return Err("missing `imageLinks` object".to_owned()),
        (_, ParsePolicy::Lenient) => None,
    };

    Ok(Volume {
        title,
        authors,
        description,
        preview_link,
        thumbnail_url,
    })
}

/// Numbers and booleans are accepted as their JSON text.
fn scalar_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err("non-scalar entry in `authors`".to_owned()),
    }
}

fn required_str(object: &Value, key: &str) -> Result<String, String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| format!("missing string field `{key}`"))
}

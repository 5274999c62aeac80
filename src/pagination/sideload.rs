//! Merging of sideloaded collections into page records

use crate::resources::to_singular;
use crate::types::{JsonObject, JsonValue, Sideload};
use std::collections::HashMap;

/// Replace URL references in `results` with the sideloaded objects.
///
/// For every sideload the page-level array is indexed by `url`. A record's
/// singular key (`document`) holding a URL is replaced by the matching
/// object; a key holding a list of URLs (`modifiers`, `relations`) by the
/// list of matching objects. URLs missing from the page become `null`.
pub fn merge_sideloads(results: &mut [JsonObject], sideloaded: &JsonObject, sideloads: &[Sideload]) {
    for sideload in sideloads {
        let Some(JsonValue::Array(items)) = sideloaded.get(sideload.as_str()) else {
            continue;
        };

        if sideload == "content" {
            for record in results.iter_mut() {
                merge_content(record, items);
            }
            continue;
        }

        let index: HashMap<&str, &JsonValue> = items
            .iter()
            .filter_map(|item| Some((item.get("url")?.as_str()?, item)))
            .collect();

        let singular = to_singular(sideload);
        for record in results.iter_mut() {
            let key = if record.contains_key(&singular) {
                singular.as_str()
            } else if record.contains_key(sideload.as_str()) {
                sideload.as_str()
            } else {
                continue;
            };

            if let Some(value) = record.get_mut(key) {
                *value = resolve(value, &index);
            }
        }
    }
}

fn resolve(value: &JsonValue, index: &HashMap<&str, &JsonValue>) -> JsonValue {
    match value {
        JsonValue::String(url) => index.get(url.as_str()).map_or(JsonValue::Null, |v| (*v).clone()),
        JsonValue::Array(urls) => JsonValue::Array(urls.iter().map(|u| resolve(u, index)).collect()),
        // Already expanded or null
        other => other.clone(),
    }
}

/// Content is sideloaded as the flat list of datapoints of all annotations
/// on the page; a record gets the ones under its own content URL.
fn merge_content(record: &mut JsonObject, items: &[JsonValue]) {
    let Some(JsonValue::String(content_url)) = record.get("content") else {
        return;
    };
    let content_url = content_url.trim_end_matches('/').to_string();
    let prefix = format!("{content_url}/");

    let mut datapoints = Vec::new();
    for item in items {
        let Some(url) = item.get("url").and_then(JsonValue::as_str) else {
            continue;
        };
        if url.trim_end_matches('/') == content_url {
            if let Some(JsonValue::Array(inner)) = item.get("content") {
                datapoints.extend(inner.iter().cloned());
            }
        } else if url.starts_with(&prefix) {
            datapoints.push(item.clone());
        }
    }

    record.insert("content".to_string(), JsonValue::Array(datapoints));
}

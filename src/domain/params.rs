use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Sideload};

/// Sideloading `content` of a list of annotations is only allowed together
/// with a filter on content schema ids.
pub fn validate_list_annotations_params(
    sideloads: &[Sideload],
    content_schema_ids: &[String],
) -> Result<()> {
    if sideloads.iter().any(|s| s == "content") && content_schema_ids.is_empty() {
        return Err(Error::invalid_params(
            "when content sideloading is requested, content_schema_ids must be provided",
        ));
    }
    Ok(())
}

/// At least one of `query` and `query_string` must be given
pub fn validate_search_params(
    query: Option<&JsonObject>,
    query_string: Option<&JsonObject>,
) -> Result<()> {
    if query.is_none() && query_string.is_none() {
        return Err(Error::invalid_params(
            "either query or query_string must be provided",
        ));
    }
    Ok(())
}

/// Body of a search request, with only the provided keys
pub fn build_search_params(
    query: Option<&JsonObject>,
    query_string: Option<&JsonObject>,
) -> JsonValue {
    let mut body = JsonObject::new();
    if let Some(query) = query {
        body.insert("query".to_string(), JsonValue::Object(query.clone()));
    }
    if let Some(query_string) = query_string {
        body.insert(
            "query_string".to_string(),
            JsonValue::Object(query_string.clone()),
        );
    }
    JsonValue::Object(body)
}

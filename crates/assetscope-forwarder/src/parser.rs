//! Parser for model output
//!
//! Turns the model's JSON text into asset field-sets. Parsing is lenient:
//! a response that is valid JSON but not an array yields no assets, and
//! array items that are not objects are skipped with a warning. Only text
//! that is not JSON at all is an error.

use assetscope_domain::AssetFields;
use serde_json::{Map, Value};
use tracing::warn;

/// Parse the model's raw text into asset field-sets
pub fn parse_model_output(text: &str) -> Result<Vec<AssetFields>, serde_json::Error> {
    let json = strip_code_fence(text);
    let value: Value = serde_json::from_str(json)?;

    let Some(items) = value.as_array() else {
        warn!("Model output is not a JSON array; returning no assets");
        return Ok(Vec::new());
    };

    let assets = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match item.as_object() {
            Some(obj) => Some(fields_from_object(obj)),
            None => {
                warn!("Skipping asset {}: not a JSON object", idx);
                None
            }
        })
        .collect();

    Ok(assets)
}

/// Remove a surrounding markdown code fence, if any
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (```json) up to the first newline
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

fn fields_from_object(obj: &Map<String, Value>) -> AssetFields {
    AssetFields {
        asset_id: string_field(obj, "assetId"),
        asset_type: string_field(obj, "type"),
        model: string_field(obj, "model"),
        serial_number: string_field(obj, "serialNumber"),
        location: string_field(obj, "location"),
    }
}

/// Normalize one field: trimmed non-empty strings pass, numbers become
/// their decimal text, everything else is absent.
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let text = r#"[{"assetId":"A-1","type":"PC","model":"OptiPlex 7090","serialNumber":"SN123","location":"กฟส.บางพลี"}]"#;
        let assets = parse_model_output(text).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].asset_id.as_deref(), Some("A-1"));
        assert_eq!(assets[0].asset_type.as_deref(), Some("PC"));
        assert_eq!(assets[0].model.as_deref(), Some("OptiPlex 7090"));
        assert_eq!(assets[0].serial_number.as_deref(), Some("SN123"));
        assert_eq!(assets[0].location.as_deref(), Some("กฟส.บางพลี"));
    }

    #[test]
    fn test_nulls_and_missing_keys_are_absent() {
        let text = r#"[{"assetId":null,"type":"Monitor"}]"#;
        let assets = parse_model_output(text).unwrap();
        assert_eq!(assets[0].asset_id, None);
        assert_eq!(assets[0].asset_type.as_deref(), Some("Monitor"));
        assert_eq!(assets[0].location, None);
    }

    #[test]
    fn test_values_are_normalized() {
        let text = r#"[{"assetId":12345,"type":"  PC  ","model":"","serialNumber":true,"location":{"x":1}}]"#;
        let assets = parse_model_output(text).unwrap();
        assert_eq!(assets[0].asset_id.as_deref(), Some("12345"));
        assert_eq!(assets[0].asset_type.as_deref(), Some("PC"));
        assert_eq!(assets[0].model, None);
        assert_eq!(assets[0].serial_number, None);
        assert_eq!(assets[0].location, None);
    }

    #[test]
    fn test_non_array_yields_empty() {
        assert!(parse_model_output(r#"{"assetId":"A-1"}"#).unwrap().is_empty());
        assert!(parse_model_output("null").unwrap().is_empty());
    }

    #[test]
    fn test_non_object_items_skipped() {
        let text = r#"["junk", 4, {"assetId":"A-2"}, null]"#;
        let assets = parse_model_output(text).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].asset_id.as_deref(), Some("A-2"));
    }

    #[test]
    fn test_code_fence_stripped() {
        let text = "```json\n[{\"assetId\":\"A-3\"}]\n```";
        let assets = parse_model_output(text).unwrap();
        assert_eq!(assets[0].asset_id.as_deref(), Some("A-3"));

        let bare = "```\n[]\n```";
        assert!(parse_model_output(bare).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_model_output("the document lists two printers").is_err());
        assert!(parse_model_output("").is_err());
    }
}

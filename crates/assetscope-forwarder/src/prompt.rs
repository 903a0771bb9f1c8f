//! Extraction instruction and response schema sent with every document.

use serde_json::{json, Value};

/// Wire names of the five asset fields, in table column order
pub const FIELD_NAMES: [&str; 5] = ["assetId", "type", "model", "serialNumber", "location"];

/// Task description passed to the model alongside the PDF
pub const EXTRACTION_INSTRUCTION: &str = "\
You are reading an equipment inventory document. Identify every physical \
asset listed in it (computers, monitors, printers, notebooks and similar \
devices) and return one object per asset with these fields:

- assetId: the inventory or asset tag number.
- type: the device category, for example PC, Monitor, Printer or Notebook.
- model: the model, series or brand name.
- serialNumber: the serial number (often labelled S/N).
- location: where the device is installed. Look for an office name that \
follows the abbreviation \"กฟส.\" or \"กฟภ.\" and report that branch name.

If a value cannot be found in the document, return null for that field. \
Do not invent values. Return an empty array if the document lists no assets.";

/// JSON schema constraining the model output to an array of asset objects
///
/// Uses the Gemini `responseSchema` dialect (upper-case type names, explicit
/// `nullable`). All five properties are required so the model emits `null`
/// rather than omitting a key.
pub fn asset_schema() -> Value {
    let properties: serde_json::Map<String, Value> = FIELD_NAMES
        .iter()
        .map(|name| {
            (
                name.to_string(),
                json!({ "type": "STRING", "nullable": true, "description": describe(name) }),
            )
        })
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": FIELD_NAMES,
        }
    })
}

fn describe(field: &str) -> &'static str {
    match field {
        "assetId" => "Inventory or asset tag number",
        "type" => "Device category such as PC, Monitor or Printer",
        "model" => "Model, series or brand",
        "serialNumber" => "Serial number (S/N)",
        "location" => "Branch office name following กฟส. or กฟภ.",
        _ => "",
    }
}

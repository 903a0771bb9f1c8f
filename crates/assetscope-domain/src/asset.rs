//! Asset module - the unit of extracted inventory information

use serde::{Deserialize, Serialize};

/// The five fields the extraction model reports for one asset
///
/// Every field may be absent: the model returns `null` when it cannot find
/// a value in the document. Serialized with camelCase keys to match the
/// forwarder's wire format (`assetId`, `serialNumber`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFields {
    /// Inventory / asset tag printed on the document
    #[serde(default)]
    pub asset_id: Option<String>,

    /// Device category (PC, Monitor, Printer, Notebook, ...)
    #[serde(default, rename = "type")]
    pub asset_type: Option<String>,

    /// Model, series or brand name
    #[serde(default)]
    pub model: Option<String>,

    /// Serial number (S/N)
    #[serde(default)]
    pub serial_number: Option<String>,

    /// Installed location, usually an office branch name
    #[serde(default)]
    pub location: Option<String>,
}

/// An extracted asset tagged with its session identity and source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Session-unique identifier (`"{source_file}-{asset_id}"`)
    pub id: String,

    /// Inventory / asset tag
    pub asset_id: Option<String>,

    /// Device category
    #[serde(rename = "type")]
    pub asset_type: Option<String>,

    /// Model, series or brand name
    pub model: Option<String>,

    /// Serial number
    pub serial_number: Option<String>,

    /// Installed location
    pub location: Option<String>,

    /// Name of the file the asset was extracted from
    pub source_file: String,
}

impl Asset {
    /// Tag a raw field-set with an id and its source file
    ///
    /// The id is the source file name joined with the extracted asset id.
    /// When the asset id is absent a random UUIDv7 suffix is used instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetscope_domain::{Asset, AssetFields};
    ///
    /// let fields = AssetFields {
    ///     asset_id: Some("PC-0042".to_string()),
    ///     ..Default::default()
    /// };
    /// let asset = Asset::from_fields(fields, "inventory.pdf");
    /// assert_eq!(asset.id, "inventory.pdf-PC-0042");
    /// assert_eq!(asset.source_file, "inventory.pdf");
    /// ```
    pub fn from_fields(fields: AssetFields, source_file: &str) -> Self {
        let suffix = match fields.asset_id.as_deref() {
            Some(asset_id) if !asset_id.is_empty() => asset_id.to_string(),
            _ => uuid::Uuid::now_v7().simple().to_string(),
        };

        Self {
            id: format!("{}-{}", source_file, suffix),
            asset_id: fields.asset_id,
            asset_type: fields.asset_type,
            model: fields.model,
            serial_number: fields.serial_number,
            location: fields.location,
            source_file: source_file.to_string(),
        }
    }

    /// Strip the session tags, returning the raw field-set
    pub fn fields(&self) -> AssetFields {
        AssetFields {
            asset_id: self.asset_id.clone(),
            asset_type: self.asset_type.clone(),
            model: self.model.clone(),
            serial_number: self.serial_number.clone(),
            location: self.location.clone(),
        }
    }
}

//! Sort configuration for the asset table

use crate::asset::Asset;
use serde::{Deserialize, Serialize};

/// Asset field a table can be sorted by
///
/// `id` and `source_file` are not sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Inventory / asset tag
    AssetId,
    /// Device category
    #[serde(rename = "type")]
    AssetType,
    /// Model or brand
    Model,
    /// Serial number
    SerialNumber,
    /// Installed location
    Location,
}

impl SortKey {
    /// All sortable keys, in table column order
    pub const ALL: [SortKey; 5] = [
        SortKey::AssetId,
        SortKey::AssetType,
        SortKey::Model,
        SortKey::SerialNumber,
        SortKey::Location,
    ];

    /// Get the key name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::AssetId => "assetId",
            SortKey::AssetType => "type",
            SortKey::Model => "model",
            SortKey::SerialNumber => "serialNumber",
            SortKey::Location => "location",
        }
    }

    /// Parse a key, accepting wire names and snake/kebab variants
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "assetid" | "id" => Some(SortKey::AssetId),
            "type" | "assettype" => Some(SortKey::AssetType),
            "model" => Some(SortKey::Model),
            "serialnumber" | "serial" | "sn" => Some(SortKey::SerialNumber),
            "location" => Some(SortKey::Location),
            _ => None,
        }
    }

    /// Read this key's value from an asset
    pub fn value_of<'a>(&self, asset: &'a Asset) -> Option<&'a str> {
        match self {
            SortKey::AssetId => asset.asset_id.as_deref(),
            SortKey::AssetType => asset.asset_type.as_deref(),
            SortKey::Model => asset.model.as_deref(),
            SortKey::SerialNumber => asset.serial_number.as_deref(),
            SortKey::Location => asset.location.as_deref(),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sort key: {}", s))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// A → Z
    #[default]
    Ascending,
    /// Z → A
    Descending,
}

/// Active (field, direction) pair for the asset table
///
/// Replaced wholesale on every change, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Field being sorted
    pub key: SortKey,
    /// Direction of the sort
    pub direction: SortDirection,
}

impl SortConfig {
    /// Create a configuration
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Ascending on the given key
    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Configuration after a header click on `key`
    ///
    /// Clicking the active key while ascending flips it to descending;
    /// anything else resets to ascending on the clicked key.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetscope_domain::{SortConfig, SortDirection, SortKey};
    ///
    /// let config = SortConfig::default();
    /// let clicked = config.toggle(SortKey::AssetId);
    /// assert_eq!(clicked.direction, SortDirection::Descending);
    ///
    /// let other = clicked.toggle(SortKey::Model);
    /// assert_eq!(other, SortConfig::ascending(SortKey::Model));
    /// ```
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key && self.direction == SortDirection::Ascending {
            Self::new(key, SortDirection::Descending)
        } else {
            Self::ascending(key)
        }
    }
}

impl Default for SortConfig {
    /// Ascending by asset id
    fn default() -> Self {
        Self::ascending(SortKey::AssetId)
    }
}

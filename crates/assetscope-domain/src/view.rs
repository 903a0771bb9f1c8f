//! View model - pure transformations over the merged asset set
//!
//! Neither function mutates its input; both are recomputed from the
//! current asset list on every render.

use crate::asset::Asset;
use crate::sort::{SortConfig, SortDirection};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Chart label for assets whose type was not extracted
pub const UNSPECIFIED_TYPE: &str = "unspecified";

/// Sort assets by the configured key, returning a new list
///
/// Absent values always sort after present ones, in both directions.
/// Present values compare as strings, inverted when descending. The sort
/// is stable: equal keys keep their input order.
///
/// # Examples
///
/// ```
/// use assetscope_domain::{sort_assets, Asset, AssetFields, SortConfig, SortKey};
///
/// let make = |id: Option<&str>| Asset::from_fields(
///     AssetFields { asset_id: id.map(String::from), ..Default::default() },
///     "doc.pdf",
/// );
/// let assets = vec![make(None), make(Some("B")), make(Some("A"))];
///
/// let sorted = sort_assets(&assets, SortConfig::ascending(SortKey::AssetId));
/// let ids: Vec<_> = sorted.iter().map(|a| a.asset_id.as_deref()).collect();
/// assert_eq!(ids, vec![Some("A"), Some("B"), None]);
/// ```
pub fn sort_assets(assets: &[Asset], config: SortConfig) -> Vec<Asset> {
    let mut sorted = assets.to_vec();
    sorted.sort_by(|a, b| compare(a, b, config));
    sorted
}

fn compare(a: &Asset, b: &Asset, config: SortConfig) -> Ordering {
    match (config.key.value_of(a), config.key.value_of(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match config.direction {
            SortDirection::Ascending => x.cmp(y),
            SortDirection::Descending => y.cmp(x),
        },
    }
}

/// One slice of the type summary chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    /// Asset type, or [`UNSPECIFIED_TYPE`]
    pub label: String,
    /// Number of assets with this type (always >= 1)
    pub count: usize,
}

impl TypeCount {
    /// Share of `total` as a whole-number percentage
    pub fn percent(&self, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((self.count as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Count assets per type, in first-seen order
///
/// Assets without a type (or with an empty one) are counted under
/// [`UNSPECIFIED_TYPE`] rather than dropped.
pub fn aggregate_by_type(assets: &[Asset]) -> Vec<TypeCount> {
    let mut buckets: Vec<TypeCount> = Vec::new();

    for asset in assets {
        let label = asset
            .asset_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNSPECIFIED_TYPE);

        match buckets.iter_mut().find(|bucket| bucket.label == label) {
            Some(bucket) => bucket.count += 1,
            None => buckets.push(TypeCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetFields;
    use crate::sort::SortKey;

    fn asset(file: &str, asset_id: Option<&str>, asset_type: Option<&str>) -> Asset {
        Asset::from_fields(
            AssetFields {
                asset_id: asset_id.map(String::from),
                asset_type: asset_type.map(String::from),
                ..Default::default()
            },
            file,
        )
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let assets = vec![asset("a.pdf", Some("2"), None), asset("a.pdf", Some("1"), None)];
        let before = assets.clone();
        let _ = sort_assets(&assets, SortConfig::default());
        assert_eq!(assets, before);
    }

    #[test]
    fn test_sort_descending() {
        let assets = vec![
            asset("a.pdf", Some("A"), None),
            asset("a.pdf", Some("C"), None),
            asset("a.pdf", Some("B"), None),
        ];
        let sorted = sort_assets(&assets, SortConfig::new(SortKey::AssetId, SortDirection::Descending));
        let ids: Vec<_> = sorted.iter().map(|a| a.asset_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_absent_sorts_last_in_both_directions() {
        let assets = vec![
            asset("a.pdf", Some("x"), None),
            asset("a.pdf", Some("y"), Some("Printer")),
            asset("a.pdf", Some("z"), Some("Monitor")),
        ];

        let asc = sort_assets(&assets, SortConfig::ascending(SortKey::AssetType));
        assert_eq!(asc[0].asset_type.as_deref(), Some("Monitor"));
        assert_eq!(asc[1].asset_type.as_deref(), Some("Printer"));
        assert!(asc[2].asset_type.is_none());

        let desc = sort_assets(&assets, SortConfig::new(SortKey::AssetType, SortDirection::Descending));
        assert_eq!(desc[0].asset_type.as_deref(), Some("Printer"));
        assert_eq!(desc[1].asset_type.as_deref(), Some("Monitor"));
        assert!(desc[2].asset_type.is_none());
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let assets = vec![
            asset("first.pdf", Some("1"), Some("PC")),
            asset("second.pdf", Some("2"), Some("PC")),
            asset("third.pdf", Some("3"), Some("PC")),
        ];
        let sorted = sort_assets(&assets, SortConfig::new(SortKey::AssetType, SortDirection::Descending));
        let files: Vec<_> = sorted.iter().map(|a| a.source_file.as_str()).collect();
        assert_eq!(files, vec!["first.pdf", "second.pdf", "third.pdf"]);
    }

    #[test]
    fn test_aggregate_first_seen_order() {
        let assets = vec![
            asset("a.pdf", None, Some("Printer")),
            asset("a.pdf", None, Some("PC")),
            asset("a.pdf", None, Some("Printer")),
            asset("a.pdf", None, None),
        ];
        let counts = aggregate_by_type(&assets);
        assert_eq!(
            counts,
            vec![
                TypeCount { label: "Printer".to_string(), count: 2 },
                TypeCount { label: "PC".to_string(), count: 1 },
                TypeCount { label: UNSPECIFIED_TYPE.to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_aggregate_empty_type_is_unspecified() {
        let assets = vec![asset("a.pdf", None, Some(""))];
        let counts = aggregate_by_type(&assets);
        assert_eq!(counts[0].label, UNSPECIFIED_TYPE);
    }

    #[test]
    fn test_aggregate_empty_input() {
        assert!(aggregate_by_type(&[]).is_empty());
    }

    #[test]
    fn test_percent() {
        let slice = TypeCount { label: "PC".to_string(), count: 1 };
        assert_eq!(slice.percent(3), 33);
        assert_eq!(slice.percent(2), 50);
        assert_eq!(slice.percent(0), 0);
    }
}

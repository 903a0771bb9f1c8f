//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use assetscope_batch::{BatchOutcome, FileFailure};
use assetscope_domain::{Asset, RejectedFile, SortConfig, SortDirection, SortKey, TypeCount};
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Width of the summary bar at 100%
const BAR_WIDTH: usize = 30;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

/// Machine-readable analysis report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    assets: &'a [Asset],
    summary: Vec<SummaryRow<'a>>,
    failures: &'a [FileFailure],
    rejected: &'a [RejectedFile],
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    label: &'a str,
    count: usize,
    percent: u32,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format assets output (already sorted by `sort`).
    pub fn format_assets(&self, assets: &[Asset], sort: SortConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(assets)?),
            OutputFormat::Table => Ok(self.format_assets_table(assets, sort)),
            OutputFormat::Quiet => Ok(self.format_assets_quiet(assets)),
        }
    }

    /// Format assets as a table, marking the sorted column.
    fn format_assets_table(&self, assets: &[Asset], sort: SortConfig) -> String {
        if assets.is_empty() {
            return self.colorize("No assets found.", "yellow");
        }

        let mut header: Vec<String> = SortKey::ALL
            .iter()
            .map(|key| {
                let title = column_title(*key);
                if *key == sort.key {
                    let arrow = match sort.direction {
                        SortDirection::Ascending => "▲",
                        SortDirection::Descending => "▼",
                    };
                    format!("{} {}", title, arrow)
                } else {
                    title.to_string()
                }
            })
            .collect();
        header.push("Source File".to_string());

        let mut builder = Builder::default();
        builder.push_record(header);

        for asset in assets {
            let mut row: Vec<&str> = SortKey::ALL
                .iter()
                .map(|key| key.value_of(asset).unwrap_or("-"))
                .collect();
            row.push(&asset.source_file);
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format assets in quiet mode (IDs only).
    fn format_assets_quiet(&self, assets: &[Asset]) -> String {
        let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
        ids.join("\n")
    }

    /// Format the type summary with share of total and a bar.
    pub fn format_summary(&self, counts: &[TypeCount], total: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary_rows(counts, total))?),
            OutputFormat::Quiet => Ok(counts
                .iter()
                .map(|c| format!("{}\t{}", c.label, c.count))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if counts.is_empty() {
                    return Ok(String::new());
                }
                let width = counts.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
                let mut lines = vec![self.colorize("Asset Summary", "cyan")];
                for slice in counts {
                    let percent = slice.percent(total);
                    let bar = "█".repeat(BAR_WIDTH * percent as usize / 100);
                    lines.push(format!(
                        "  {:<width$}  {:>4}  {:>3}%  {}",
                        slice.label,
                        slice.count,
                        percent,
                        self.colorize(&bar, "blue"),
                        width = width
                    ));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a whole batch outcome as one JSON document.
    pub fn format_report(
        &self,
        outcome: &BatchOutcome,
        sorted: &[Asset],
        counts: &[TypeCount],
    ) -> Result<String> {
        let report = Report {
            assets: sorted,
            summary: summary_rows(counts, sorted.len()),
            failures: &outcome.failures,
            rejected: &outcome.rejected,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn summary_rows(counts: &[TypeCount], total: usize) -> Vec<SummaryRow<'_>> {
    counts
        .iter()
        .map(|c| SummaryRow {
            label: &c.label,
            count: c.count,
            percent: c.percent(total),
        })
        .collect()
}

/// Table header for a sort key.
pub fn column_title(key: SortKey) -> &'static str {
    match key {
        SortKey::AssetId => "Asset ID",
        SortKey::AssetType => "Type",
        SortKey::Model => "Model",
        SortKey::SerialNumber => "Serial Number",
        SortKey::Location => "Location",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetscope_domain::{aggregate_by_type, AssetFields};

    fn create_test_asset(asset_id: Option<&str>, asset_type: Option<&str>) -> Asset {
        Asset::from_fields(
            AssetFields {
                asset_id: asset_id.map(String::from),
                asset_type: asset_type.map(String::from),
                model: Some("ThinkCentre M70".to_string()),
                serial_number: None,
                location: Some("กฟส.บางพลี".to_string()),
            },
            "inv.pdf",
        )
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let assets = vec![create_test_asset(Some("A-1"), Some("PC"))];
        let output = formatter
            .format_assets(&assets, SortConfig::default())
            .unwrap();
        assert!(output.contains("Asset ID ▲"));
        assert!(output.contains("Serial Number"));
        assert!(output.contains("inv.pdf"));
        assert!(output.contains("กฟส.บางพลี"));
    }

    #[test]
    fn test_descending_marker() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let assets = vec![create_test_asset(Some("A-1"), Some("PC"))];
        let sort = SortConfig::new(SortKey::Location, SortDirection::Descending);
        let output = formatter.format_assets(&assets, sort).unwrap();
        assert!(output.contains("Location ▼"));
        assert!(!output.contains("Asset ID ▲"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let assets = vec![create_test_asset(Some("A-1"), Some("PC"))];
        let output = formatter
            .format_assets(&assets, SortConfig::default())
            .unwrap();
        assert!(output.contains("\"assetId\": \"A-1\""));
        assert!(output.contains("\"sourceFile\": \"inv.pdf\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let assets = vec![
            create_test_asset(Some("A-1"), None),
            create_test_asset(Some("A-2"), None),
        ];
        let output = formatter
            .format_assets(&assets, SortConfig::default())
            .unwrap();
        assert_eq!(output, "inv.pdf-A-1\ninv.pdf-A-2");
    }

    #[test]
    fn test_empty_assets() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_assets(&[], SortConfig::default()).unwrap();
        assert!(output.contains("No assets found"));
    }

    #[test]
    fn test_summary_percentages() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let assets = vec![
            create_test_asset(None, Some("PC")),
            create_test_asset(None, Some("PC")),
            create_test_asset(None, Some("Printer")),
            create_test_asset(None, None),
        ];
        let counts = aggregate_by_type(&assets);
        let output = formatter.format_summary(&counts, assets.len()).unwrap();
        assert!(output.contains("Asset Summary"));
        assert!(output.contains(" 50%"));
        assert!(output.contains(" 25%"));
        assert!(output.contains("unspecified"));
    }

    #[test]
    fn test_report_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let assets = vec![create_test_asset(Some("A-1"), Some("PC"))];
        let outcome = BatchOutcome {
            assets: assets.clone(),
            failures: vec![FileFailure {
                file: "bad.pdf".to_string(),
                reason: "timeout".to_string(),
            }],
            rejected: vec![],
        };
        let counts = aggregate_by_type(&assets);
        let output = formatter.format_report(&outcome, &assets, &counts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["assets"][0]["assetId"], "A-1");
        assert_eq!(value["summary"][0]["percent"], 100);
        assert_eq!(value["failures"][0]["file"], "bad.pdf");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}

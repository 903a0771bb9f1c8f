//! Interactive REPL (Read-Eval-Print Loop) for browsing extracted assets.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use assetscope_domain::{
    aggregate_by_type, sort_assets, Asset, SortConfig, SortDirection, SortKey, TypeCount,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Assets and table order for one analysis session.
///
/// The asset list is fixed once loaded; the sort configuration is replaced
/// on every sort command.
#[derive(Debug, Clone)]
pub struct Session {
    assets: Vec<Asset>,
    sort: SortConfig,
}

impl Session {
    /// Create a session over merged batch results.
    pub fn new(assets: Vec<Asset>, sort: SortConfig) -> Self {
        Self { assets, sort }
    }

    /// Current sort configuration.
    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    /// Assets in current table order.
    pub fn sorted(&self) -> Vec<Asset> {
        sort_assets(&self.assets, self.sort)
    }

    /// Per-type counts, in first-seen order.
    pub fn summary(&self) -> Vec<TypeCount> {
        aggregate_by_type(&self.assets)
    }

    /// Number of assets in the session.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the session holds no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Apply a sort command: toggle on the same key, or set a direction.
    pub fn apply_sort(&mut self, key: SortKey, direction: Option<SortDirection>) {
        self.sort = match direction {
            Some(direction) => SortConfig::new(key, direction),
            None => self.sort.toggle(key),
        };
    }
}

/// Print the summary followed by the asset table.
pub fn print_view(session: &Session, formatter: &Formatter) -> Result<()> {
    let summary = formatter.format_summary(&session.summary(), session.len())?;
    if !summary.is_empty() {
        println!("{}", summary);
        println!();
    }
    println!("{}", formatter.format_assets(&session.sorted(), session.sort())?);
    Ok(())
}

/// Run the interactive REPL.
pub fn run_repl(session: &mut Session, formatter: &Formatter, history_size: usize) -> Result<()> {
    println!(
        "{}",
        formatter.info(&format!(
            "{} asset(s) loaded - Type 'help' for commands, 'exit' to quit",
            session.len()
        ))
    );
    println!();
    print_view(session, formatter)?;

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("assetscope> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(ReplCommand::Sort { key, direction }) => {
                        session.apply_sort(key, direction);
                        println!("{}", formatter.format_assets(&session.sorted(), session.sort())?);
                    }
                    Ok(ReplCommand::Table) => {
                        println!("{}", formatter.format_assets(&session.sorted(), session.sort())?);
                    }
                    Ok(ReplCommand::Summary) => {
                        println!("{}", formatter.format_summary(&session.summary(), session.len())?);
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Show available commands
    Help,
    /// Re-sort the table
    Sort {
        /// Column to sort by
        key: SortKey,
        /// Explicit direction; toggles when absent
        direction: Option<SortDirection>,
    },
    /// Print the table
    Table,
    /// Print the type summary
    Summary,
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "table" | "list" | "ls" => Ok(ReplCommand::Table),
        "summary" | "chart" => Ok(ReplCommand::Summary),
        "sort" => parse_sort_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_sort_command(args: &[&str]) -> Result<ReplCommand> {
    let usage = || {
        CliError::InvalidInput(
            "Usage: sort <assetId|type|model|serialNumber|location> [asc|desc]".to_string(),
        )
    };

    let key = args.first().and_then(|s| SortKey::parse(s)).ok_or_else(usage)?;
    let direction = match args.get(1).map(|s| s.to_lowercase()) {
        None => None,
        Some(d) if d == "asc" || d == "ascending" => Some(SortDirection::Ascending),
        Some(d) if d == "desc" || d == "descending" => Some(SortDirection::Descending),
        Some(_) => return Err(usage()),
    };

    Ok(ReplCommand::Sort { key, direction })
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  sort <field> [asc|desc]   - Sort the table; repeating a field flips direction");
    println!("    field: assetId | type | model | serialNumber | location");
    println!("  table, list               - Show the asset table");
    println!("  summary, chart            - Show assets per type");
    println!("  help, ?                   - Show this help");
    println!("  exit, quit, q             - Exit REPL");
    println!();
}

//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            if formatter.format() == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!(
                    "{}",
                    formatter.info(&format!("Config file: {}", Config::path()?.display()))
                );
                println!("{}", config.to_toml()?);
            }
        }
        ConfigAction::SetEndpoint { url } => {
            config.set_endpoint(&url)?;
            config.save()?;
            println!(
                "{}",
                formatter.success(&format!("Endpoint set to {}", config.endpoint))
            );
        }
    }

    Ok(())
}

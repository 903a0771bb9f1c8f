//! AssetScope Forwarder CLI
//!
//! Starts the Forwarder HTTP server for PDF asset extraction.

use assetscope_forwarder::{config::ForwarderConfig, start_server, ForwarderError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ForwarderError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ForwarderConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: assetscope-forwarder --config <path-to-config.toml>");
        eprintln!();
        ForwarderConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("AssetScope Forwarder - PDF asset extraction service");
    println!();
    println!("USAGE:");
    println!("    assetscope-forwarder --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /api/process-pdf    multipart/form-data with a 'pdfFile' part");
    println!("    GET  /health             liveness and credential status");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 3000)");
    println!("    - model: Gemini model name (default: gemini-2.5-flash)");
    println!("    - api_key_env: Variable holding the API key (default: API_KEY)");
    println!("    - max_upload_bytes: Request body limit (default: 26214400)");
    println!("    - upload_dir: Directory for temporary uploads (optional)");
    println!("    - inference_timeout_secs: Model call timeout (default: 120)");
    println!();
}

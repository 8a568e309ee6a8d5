//! CLI entry point for the gti-tools graph tools.
//!
//! Designed for subprocess invocation from an agent host:
//! reads a JSON tool call from stdin, writes a JSON result to stdout.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use gti_graph::{url_id, HttpSessionFactory};
use gti_tools::{ToolCall, ToolContext, CATALOGUE};

#[derive(Parser)]
#[command(name = "gti-tools")]
#[command(about = "Threat-intelligence graph tools over the GTI API")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: gti).
    #[arg(short, long, default_value = "gti", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tool catalogue as JSON.
    List,
    /// Run one tool call (reads `{"tool": .., "arguments": {..}}` from stdin).
    Call,
    /// Print the API identifier of a URL.
    UrlId {
        /// The URL to encode.
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            println!("{}", serde_json::to_string(CATALOGUE)?);
        }
        Command::UrlId { ref url } => {
            println!("{}", url_id(url));
        }
        Command::Call => {
            let input = std::io::read_to_string(std::io::stdin())?;
            let call: ToolCall = match serde_json::from_str(&input) {
                Ok(call) => call,
                Err(e) => return report_error(format!("Invalid tool call: {e}")),
            };

            let config = gti_core::config::load(&cli.config)?;
            let ctx = ToolContext::new(HttpSessionFactory::new(config.api));

            match ctx.call(call).await {
                Ok(result) => println!("{}", serde_json::to_string(&result)?),
                Err(e) => return report_error(e.to_string()),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn report_error(message: String) -> anyhow::Result<ExitCode> {
    println!("{}", json!({ "error": message }));
    Ok(ExitCode::FAILURE)
}

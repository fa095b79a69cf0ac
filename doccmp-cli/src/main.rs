//! Doccmp CLI - compare the text of a PDF and an Excel file

mod commands;

use clap::{Args, Parser, Subcommand};
use doccmp_config::HighlightMode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doccmp", version)]
#[command(about = "Upload a PDF and an Excel file to a comparison server and show the differences")]
struct Cli {
    /// Config file (default: ~/.doccmp/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload both files and render the comparison
    Compare(CompareArgs),

    /// Render a previously saved comparison result
    Render(RenderArgs),

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct CompareArgs {
    /// PDF file to upload
    #[arg(long)]
    pdf: PathBuf,

    /// Excel file to upload
    #[arg(long)]
    excel: PathBuf,

    /// Extra form field sent with the upload (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// Server base URL, overriding the config
    #[arg(long)]
    endpoint: Option<String>,

    /// Write the raw server result as JSON
    #[arg(long, value_name = "FILE")]
    save_json: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct RenderArgs {
    /// Saved comparison result (JSON)
    result: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Write an HTML report
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Report title
    #[arg(long, default_value = "PDF / Excel comparison")]
    title: String,

    /// Open the interactive viewer
    #[arg(long)]
    view: bool,

    /// Token highlighting in the PDF pane (tokens | plain)
    #[arg(long)]
    pdf_highlight: Option<HighlightMode>,

    /// Token highlighting in the Excel pane (tokens | plain)
    #[arg(long)]
    excel_highlight: Option<HighlightMode>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doccmp=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

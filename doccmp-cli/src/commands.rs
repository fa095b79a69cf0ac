//! Subcommand implementations

use crate::{Cli, Commands, CompareArgs, ConfigAction, OutputArgs, RenderArgs};
use doccmp_cli::client::HttpTransport;
use doccmp_cli::controller::{SubmitOutcome, UploadController, UploadForm};
use doccmp_cli::error::{CliError, Result};
use doccmp_cli::render::{html, render, summary, RenderOptions};
use doccmp_cli::tui;
use doccmp_config::{config, defaults, writer, Config};
use doccmp_proto::ComparisonResult;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Compare(args) => {
            let config = load_config(cli.config.as_deref())?;
            compare(args, config).await
        }
        Commands::Render(args) => {
            let config = load_config(cli.config.as_deref())?;
            render_saved(args, &config)
        }
        Commands::Config { action } => config_action(action, cli.config),
    }
}

/// Explicit paths must load; the default location falls back to defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load_from_file(path)?),
        None => Ok(Config::load_or_default()?),
    }
}

async fn compare(args: CompareArgs, mut config: Config) -> Result<ExitCode> {
    if let Some(endpoint) = args.endpoint {
        config.server.base_url = endpoint;
        config.validate()?;
    }

    let mut form = UploadForm::new(&config.form);
    form.pdf.select(Some(args.pdf));
    form.excel.select(Some(args.excel));
    for field in &args.fields {
        let (key, value) = parse_field(field)?;
        form.add_field(key, value);
    }
    info!("PDF: {}  Excel: {}", form.pdf.label(), form.excel.label());

    let controller = UploadController::new(HttpTransport::new(&config.server)?, &config);
    let result = match controller.submit(&form).await {
        SubmitOutcome::Completed(result) => result,
        SubmitOutcome::Rejected => {
            ComparisonResult::failure("A comparison is already in progress.")
        }
    };

    if let Some(path) = &args.save_json {
        std::fs::write(path, result.to_json_pretty()?)?;
        info!("Saved result to {}", path.display());
    }

    present(&result, &args.output, &config)
}

fn render_saved(args: RenderArgs, config: &Config) -> Result<ExitCode> {
    let body = std::fs::read_to_string(&args.result)?;
    let result = ComparisonResult::from_json(&body).map_err(|source| CliError::ResultFile {
        path: args.result.clone(),
        source,
    })?;
    present(&result, &args.output, config)
}

/// Print the summary, then write/show the requested outputs
fn present(result: &ComparisonResult, output: &OutputArgs, config: &Config) -> Result<ExitCode> {
    let mut options = RenderOptions::from(&config.render);
    if let Some(mode) = output.pdf_highlight {
        options.pdf_highlight = mode;
    }
    if let Some(mode) = output.excel_highlight {
        options.excel_highlight = mode;
    }

    let report = render(result, &options);
    if !report.success {
        warn!("Comparison failed: {}", report.diff.body.plain_text());
    }

    print!("{}", summary::to_text(&report));

    if let Some(path) = &output.html {
        std::fs::write(path, html::to_html(&report, &output.title))?;
        info!("Wrote HTML report to {}", path.display());
    }

    let success = report.success;
    if output.view {
        tui::run(report, &config.ui)?;
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn config_action(action: ConfigAction, explicit: Option<PathBuf>) -> Result<ExitCode> {
    let path = match explicit.clone() {
        Some(path) => path,
        None => config::config_file()?,
    };

    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                println!("{} already exists (use --force to overwrite)", path.display());
                return Ok(ExitCode::FAILURE);
            }
            writer::save_to_file(&defaults::default_config(), &path)?;
            println!("Wrote {}", path.display());
        }
        ConfigAction::Show => {
            let config = load_config(explicit.as_deref())?;
            print!("{}", writer::to_toml_string(&config)?);
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(ExitCode::SUCCESS)
}

/// Split `key=value`
fn parse_field(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::FormField(raw.to_string())),
    }
}

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const BINARY: &str = "doccmp";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for the doccmp workspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and install the doccmp binary
    Install {
        /// Target directory (default: ~/.cargo/bin, then ~/.local/bin)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Run fmt, clippy and the test suite like CI does
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Install { path } => install(path),
        Commands::Ci => ci(),
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("$ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .current_dir(project_root()?)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args[0]))?;
    if !status.success() {
        bail!("cargo {} failed", args[0]);
    }
    Ok(())
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all", "--", "--check"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    cargo(&["test", "--workspace"])?;
    println!("All checks passed");
    Ok(())
}

fn install(custom_path: Option<PathBuf>) -> Result<()> {
    cargo(&["build", "--release", "-p", "doccmp-cli"])?;

    let install_dir = determine_install_dir(custom_path)?;
    fs::create_dir_all(&install_dir)
        .with_context(|| format!("Failed to create directory: {}", install_dir.display()))?;

    let src = project_root()?.join("target/release").join(BINARY);
    if !src.exists() {
        bail!("Binary not found: {}", src.display());
    }
    let dst = install_dir.join(BINARY);
    fs::copy(&src, &dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;

    let mut perms = fs::metadata(&dst)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&dst, perms)?;
    println!("Installed: {}", dst.display());

    if !on_path(&install_dir) {
        println!();
        println!("Note: {} is not in your PATH.", install_dir.display());
        println!("  export PATH=\"{}:$PATH\"", install_dir.display());
    }
    println!();
    println!("Run `{} config init` to write a default config.", BINARY);

    Ok(())
}

fn on_path(dir: &Path) -> bool {
    let Ok(path_env) = std::env::var("PATH") else {
        return false;
    };
    std::env::split_paths(&path_env).any(|p| p == dir)
}

fn determine_install_dir(custom_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom_path {
        return Ok(path);
    }

    let home = PathBuf::from(std::env::var("HOME").context("HOME environment variable not set")?);
    let cargo_bin = home.join(".cargo/bin");
    let local_bin = home.join(".local/bin");

    if !cargo_bin.exists() && local_bin.exists() {
        return Ok(local_bin);
    }
    Ok(cargo_bin)
}

fn project_root() -> Result<PathBuf> {
    // CARGO_MANIFEST_DIR is xtask/ when run through `cargo run -p xtask`
    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        if let Some(parent) = Path::new(&dir).parent() {
            return Ok(parent.to_path_buf());
        }
    }

    let mut current = std::env::current_dir()?;
    loop {
        let manifest = current.join("Cargo.toml");
        if manifest.exists() && fs::read_to_string(&manifest)?.contains("[workspace]") {
            return Ok(current);
        }
        if !current.pop() {
            bail!("Could not find workspace root");
        }
    }
}

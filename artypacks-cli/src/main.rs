//! Artypacks brushset converter, terminal edition.
//!
//! Drives the same license gate the web page uses:
//! 1. Validate a license key (with the cold-start retry policy)
//! 2. Queue up to three `.brushset` files
//! 3. Upload them and print the download link
//!
//! Usage:
//!   artypacks check ABCDE12345
//!   artypacks convert --key ABCDE12345 Inking.brushset Sketch.brushset
//!
//! Endpoint URLs are read from the environment or the matching flags.

use anyhow::{bail, ensure, Context, Result};
use artypacks_api::{
    ApiConfig, ContactClient, ContactMessage, HistoryClient, HttpConvertClient,
    CONTACT_SENT_MESSAGE,
};
use artypacks_gate::{Gate, GateConfig, View};
use artypacks_license::{HttpCheckClient, LicenseKey, ProgressFn, Validator, ValidatorConfig};
use artypacks_types::{
    is_brushset, Endpoints, SelectedFile, CHECK_ENDPOINT_VAR, CONTACT_ENDPOINT_VAR,
    CONVERT_ENDPOINT_VAR, HISTORY_ENDPOINT_VAR,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "artypacks")]
#[command(about = "Convert Procreate brushsets with an Artypacks license key")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    endpoints: EndpointArgs,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a license key and print its status
    Check {
        key: String,
    },
    /// Upload brushsets for conversion
    Convert {
        /// License key to convert with
        #[arg(short, long)]
        key: String,

        /// `.brushset` files to upload (at most 3 are queued)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List previous conversions for a license key
    History {
        #[arg(short, long)]
        key: String,
    },
    /// Send a message to support
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Args, Debug)]
struct EndpointArgs {
    /// License check endpoint
    #[arg(long, env = CHECK_ENDPOINT_VAR, global = true, hide_env_values = true)]
    check_endpoint: Option<String>,

    /// Conversion endpoint
    #[arg(long, env = CONVERT_ENDPOINT_VAR, global = true, hide_env_values = true)]
    convert_endpoint: Option<String>,

    /// Conversion history endpoint
    #[arg(long, env = HISTORY_ENDPOINT_VAR, global = true, hide_env_values = true)]
    history_endpoint: Option<String>,

    /// Contact form relay endpoint
    #[arg(long, env = CONTACT_ENDPOINT_VAR, global = true, hide_env_values = true)]
    contact_endpoint: Option<String>,
}

impl EndpointArgs {
    fn lookup(&self, var: &str) -> Option<String> {
        let value = match var {
            CHECK_ENDPOINT_VAR => &self.check_endpoint,
            CONVERT_ENDPOINT_VAR => &self.convert_endpoint,
            HISTORY_ENDPOINT_VAR => &self.history_endpoint,
            CONTACT_ENDPOINT_VAR => &self.contact_endpoint,
            _ => return None,
        };
        value.clone()
    }

    /// Both endpoints the converter needs.
    fn resolve(&self) -> Result<Endpoints> {
        Endpoints::from_lookup(|var| self.lookup(var)).context("endpoint configuration")
    }

    fn require(&self, var: &'static str) -> Result<String> {
        let url = self
            .lookup(var)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .with_context(|| {
                format!("{var} is not set (pass it as a flag or in the environment)")
            })?;
        ensure!(
            url.starts_with("http://") || url.starts_with("https://"),
            "{var} is not an http(s) URL: {url}"
        );
        Ok(url)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("artypacks {} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Check { key } => check(&cli.endpoints, &key).await,
        Command::Convert { key, files } => convert(&cli.endpoints, &key, &files).await,
        Command::History { key } => history(&cli.endpoints, &key).await,
        Command::Contact {
            name,
            email,
            message,
        } => contact(&cli.endpoints, ContactMessage { name, email, message }).await,
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` picks debug over info.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn check(endpoints: &EndpointArgs, raw_key: &str) -> Result<()> {
    let key = LicenseKey::parse(raw_key)?;
    let checker = Arc::new(HttpCheckClient::new(endpoints.require(CHECK_ENDPOINT_VAR)?)?);
    let validator = Validator::new(checker, ValidatorConfig::default());

    let progress: ProgressFn = Arc::new(|message: &'static str| eprintln!("{message}"));
    let token = CancellationToken::new();
    let _ctrl_c = cancel_on_ctrl_c(&token);

    let outcome = validator.validate(&key, false, &token, Some(progress)).await;
    match outcome.status_line() {
        Some(status) => println!("{}", status.text),
        None => bail!("license check cancelled"),
    }
    ensure!(outcome.is_valid(), "license key not accepted");
    Ok(())
}

async fn convert(endpoints: &EndpointArgs, raw_key: &str, paths: &[PathBuf]) -> Result<()> {
    let endpoints = endpoints.resolve()?;
    let api = ApiConfig::default();
    let checker = Arc::new(HttpCheckClient::new(endpoints.check.as_str())?);
    let converter = Arc::new(HttpConvertClient::new(endpoints.convert.as_str(), &api)?);

    // No one is typing; check the key straight away.
    let config = GateConfig {
        debounce_ms: 0,
        ..Default::default()
    };
    let mut gate = Gate::new(checker, converter, config);

    LicenseKey::parse(raw_key)?;
    gate.on_key_input(raw_key);
    while let Some(view) = gate.next_update().await {
        print_status(&view);
    }
    if !gate.state().is_license_valid() {
        bail!("license key not accepted");
    }

    let max_files = gate.config().max_files;
    let selection = select_paths(paths, max_files);
    for name in &selection.rejected {
        warn!("Skipping {}: not a .brushset file", name);
    }
    for name in &selection.dropped {
        warn!("Skipping {}: at most {} files per conversion", name, max_files);
    }
    if selection.to_read.is_empty() {
        bail!("only .brushset files can be converted");
    }

    let mut files = Vec::with_capacity(selection.to_read.len());
    for path in selection.to_read {
        let file = SelectedFile::from_path(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.push(file);
    }
    gate.add_files(files)?;
    print!("{}", gate.view());

    let token = CancellationToken::new();
    let ctrl_c = cancel_on_ctrl_c(&token);
    let conversion = gate.convert_with(token).await.context("conversion failed")?;
    ctrl_c.abort();
    info!("Conversion finished");
    println!("Download: {}", conversion.download_url);

    let view = gate.settle().await;
    print_status(&view);
    Ok(())
}

async fn history(endpoints: &EndpointArgs, raw_key: &str) -> Result<()> {
    let key = LicenseKey::parse(raw_key)?;
    let endpoint = endpoints.require(HISTORY_ENDPOINT_VAR)?;
    let client = HistoryClient::new(endpoint, &ApiConfig::default())?;

    let entries = client.fetch(&key).await.context("failed to fetch history")?;
    if entries.is_empty() {
        println!("No previous conversions for this key.");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{}  {}  {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.original_filename,
            entry.download_url
        );
    }
    Ok(())
}

async fn contact(endpoints: &EndpointArgs, message: ContactMessage) -> Result<()> {
    let endpoint = endpoints.require(CONTACT_ENDPOINT_VAR)?;
    let client = ContactClient::new(endpoint, &ApiConfig::default())?;
    client.submit(&message).await.context("failed to send message")?;
    println!("{CONTACT_SENT_MESSAGE}");
    Ok(())
}

/// Paths sorted by name alone, before anything is read from disk.
#[derive(Debug, Default, PartialEq, Eq)]
struct Selection<'a> {
    to_read: Vec<&'a Path>,
    rejected: Vec<String>,
    dropped: Vec<String>,
}

/// Applies the `.brushset` filter and the cap to `paths`, in order.
fn select_paths(paths: &[PathBuf], max_files: usize) -> Selection<'_> {
    let mut selection = Selection::default();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if !is_brushset(&name) {
            selection.rejected.push(name);
        } else if selection.to_read.len() >= max_files {
            selection.dropped.push(name);
        } else {
            selection.to_read.push(path);
        }
    }
    selection
}

fn print_status(view: &View) {
    if let Some(status) = &view.license_status {
        eprintln!("{}", status.text);
    }
}

/// Cancels `token` on the first Ctrl-C. Abort the handle once the guarded
/// work is over.
fn cancel_on_ctrl_c(token: &CancellationToken) -> tokio::task::JoinHandle<()> {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            token.cancel();
        }
    })
}

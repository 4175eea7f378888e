use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use fsbrowse::auth::warm_placeholder;
use fsbrowse::browse::validate_root;
use fsbrowse::{AppState, Config, SessionStore, WebServer};

/// Remote directory browser.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory to serve.
    #[arg(short = 'd', long = "dir")]
    dir: Option<String>,

    /// Host address to bind.
    #[arg(long)]
    host: Option<String>,

    /// PEM certificate chain.
    #[arg(long)]
    cert: Option<String>,

    /// PEM private key.
    #[arg(long)]
    key: Option<String>,

    /// Serve plain HTTP.
    #[arg(long)]
    no_tls: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.dir {
            config.server.root_dir = dir.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(cert) = &self.cert {
            config.tls.cert_file = cert.clone();
        }
        if let Some(key) = &self.key {
            config.tls.key_file = key.clone();
        }
        if self.no_tls {
            config.tls.enabled = false;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration; only a missing file falls back to defaults
    let mut config = match Config::load_with_env(&args.config) {
        Ok(config) => config,
        Err(e) if e.is_not_found() => {
            eprintln!("{} not found, using default configuration.", args.config.display());
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
        Err(e) => {
            eprintln!("Failed to load {}: {e}", args.config.display());
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut config);

    // Initialize logging
    if let Err(e) = fsbrowse::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        fsbrowse::logging::init_console_only(&config.logging.level);
    }

    info!("fsbrowse - remote directory browser");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fsbrowse terminated");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> fsbrowse::Result<()> {
    config.validate()?;

    let root_dir = validate_root(&config.server.root_dir)?;
    info!(root = %root_dir.display(), "Serving directory");

    let store = SessionStore::new();
    store.seed(&config.users)?;
    let users = store.user_count()?;
    if users == 0 {
        warn!("No users configured, every login will be rejected");
    } else {
        info!(users, "Users loaded");
    }
    warm_placeholder();

    let state = Arc::new(AppState::new(Arc::new(store), root_dir));
    let server = WebServer::new(&config, state)?;
    server.run().await
}

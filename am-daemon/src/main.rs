//! Adaptive MIPI Daemon (adaptive-mipid)
//!
//! Hosts the adaptive MIPI service: the modem bridge pushes CP channel info
//! notifications in, camera HALs ask which MIPI clock setting to program.
//! Both talk JSON lines over a Unix domain socket.
//!
//! # Hardening
//! - Restrictive umask (0077) before the socket is created
//! - Socket path must be absolute and not a symlink
//! - Connection, message size and timeout limits in the server

mod server;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use am_core::constants::{env, paths};
use am_core::{load_config, load_default_config, AdaptiveMipi, AdaptiveMipiConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn set_secure_umask() {
    // SAFETY: umask only changes the process file creation mask.
    unsafe { libc::umask(0o077) };
}

fn validate_socket_path(path: &str) -> Result<(), String> {
    let p = Path::new(path);

    if !p.is_absolute() {
        return Err("Socket path must be absolute".into());
    }
    if path.contains("..") {
        return Err("Socket path contains path traversal".into());
    }
    if let Some(parent) = p.parent() {
        if !parent.exists() {
            return Err(format!("Parent directory does not exist: {:?}", parent));
        }
    }
    if p.symlink_metadata().map(|m| m.file_type().is_symlink()).unwrap_or(false) {
        return Err("Socket path is a symlink".into());
    }

    Ok(())
}

fn init_logging(log_level: &str) -> bool {
    let use_journald = Path::new(paths::JOURNALD_SOCKET).exists();

    if use_journald {
        match tracing_journald::layer() {
            Ok(journald_layer) => {
                use tracing_subscriber::prelude::*;
                tracing_subscriber::registry()
                    .with(journald_layer)
                    .with(tracing_subscriber::EnvFilter::new(log_level))
                    .init();
                return true;
            }
            Err(e) => {
                eprintln!("Failed to create journald layer: {}, falling back to stdout", e);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(log_level)
        .init();
    false
}

fn print_help() {
    eprintln!("adaptive-mipid {} - Adaptive MIPI clock selection daemon", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    adaptive-mipid [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -s, --socket PATH   Socket path (default from config, {})", paths::SOCKET_PATH);
    eprintln!("    -c, --config PATH   Config file (default {}/{})", paths::CONFIG_DIR, paths::CONFIG_FILE);
    eprintln!("    -v, --version       Print version");
    eprintln!("    -h, --help          Print this help");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("    {:<19} Log filter (overrides log_level from config)", env::LOG);
    eprintln!("    {:<19} Engineering clock override (0 or 10+)", env::MODE);
}

struct Args {
    socket: Option<String>,
    config: Option<PathBuf>,
}

/// `None` when the process should exit successfully without serving
fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args { socket: None, config: None };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(None);
            }
            "-v" | "--version" => {
                println!("adaptive-mipid {}", VERSION);
                return Ok(None);
            }
            "-s" | "--socket" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--socket requires a path argument"))?;
                parsed.socket = Some(path);
            }
            "-c" | "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path argument"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            other => {
                print_help();
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
    }

    Ok(Some(parsed))
}

fn load(config_path: Option<&Path>) -> anyhow::Result<AdaptiveMipiConfig> {
    let config = match config_path {
        Some(path) => {
            let mut config = load_config(path)?;
            config.apply_env()?;
            config.validate()?;
            config
        }
        None => load_default_config()?,
    };
    Ok(config)
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    set_secure_umask();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = load(args.config.as_deref())?;

    let log_level = std::env::var(env::LOG).unwrap_or_else(|_| config.log_level.clone());
    let use_journald = init_logging(&log_level);

    info!("STARTUP: adaptive-mipid {} starting", VERSION);
    info!("STARTUP: Logging to {}", if use_journald { "systemd journal" } else { "stdout" });

    let socket_path = args.socket.unwrap_or_else(|| config.socket_path.clone());
    if let Err(e) = validate_socket_path(&socket_path) {
        error!("Invalid socket path: {}", e);
        anyhow::bail!("invalid socket path {}: {}", socket_path, e);
    }

    let mipi = Arc::new(AdaptiveMipi::new(&config));
    if mipi.register() {
        info!("STARTUP: channel info listener registered");
    }
    debug!(
        "STARTUP: adaptive_mipi_mode={}, factory={}, frs_dram_test={}",
        mipi.params().adaptive_mipi_mode(),
        mipi.params().factory_mode(),
        mipi.params().frs_dram_test_mode()
    );

    info!("STARTUP: Socket path: {}", socket_path);
    info!("STARTUP: PID: {}", std::process::id());

    let state = Arc::new(server::ServerState::new(mipi));
    server::run_server(&socket_path, state, shutdown_signal()).await?;

    info!("SHUTDOWN: adaptive-mipid stopped");
    Ok(())
}

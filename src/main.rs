//! `clavier-build` — configuration front-end for the Clavier toolchain.
//!
//! Loads, validates, and exports the build configuration. The heavy lifting
//! (bundling, dev serving, service-worker generation) is done by external
//! consumers of the exported JSON; this binary is the gatekeeper in front
//! of them.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clavier_build::config::watcher::ConfigWatcher;
use clavier_build::config::{load_config, ConfigError, ConfigHandle, CONFIG_TEMPLATE};
use clavier_build::export::{DevServerTable, PluginPipeline, SwGeneratorConfig};

#[derive(Parser)]
#[command(name = "clavier-build")]
#[command(about = "Build configuration front-end for the Clavier web client", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "clavier.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the configuration, reporting every problem
    Check,
    /// Print the normalized configuration as JSON
    Show,
    /// Export a consumer-specific configuration as JSON
    Export {
        #[arg(value_enum)]
        target: ExportTarget,

        /// Write to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write a default configuration file
    Init,
    /// Watch the configuration file and revalidate on every change
    Watch,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    /// Service-worker generator input
    Sw,
    /// Dev-server proxy table
    DevServer,
    /// Plugin pipeline
    Plugins,
}

/// Binary-local error type; the library modules expose their own.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("refusing to overwrite existing config: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to start config watcher: {0}")]
    Watch(notify::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clavier_build=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Validation errors are printed one per line; everything else as-is.
fn report(error: &CliError) {
    match error {
        CliError::Config(ConfigError::Validation(errors)) => {
            eprintln!("Configuration is invalid ({} problem(s)):", errors.len());
            for e in errors {
                eprintln!("  - {e}");
            }
        }
        other => eprintln!("Error: {other}"),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Check => {
            let config = load_config(&cli.config)?;
            println!(
                "OK: {} plugin(s), {} cache rule(s), {} proxy rule(s)",
                config.plugins.len(),
                config.cache.rules.len(),
                config.dev_server.proxy.len()
            );
            Ok(())
        }
        Commands::Show => {
            let config = load_config(&cli.config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Export { target, out } => {
            let config = load_config(&cli.config)?;
            let json = match target {
                ExportTarget::Sw => SwGeneratorConfig::from_config(&config).to_json()?,
                ExportTarget::DevServer => DevServerTable::from_config(&config).to_json()?,
                ExportTarget::Plugins => PluginPipeline::from_config(&config).to_json()?,
            };
            match out {
                Some(path) => fs::write(&path, json)?,
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Init => {
            if cli.config.exists() {
                return Err(CliError::AlreadyExists(cli.config));
            }
            fs::write(&cli.config, CONFIG_TEMPLATE)?;
            println!("Wrote {}", cli.config.display());
            Ok(())
        }
        Commands::Watch => watch(cli.config).await,
    }
}

/// Run the reload loop until ctrl-c.
async fn watch(path: PathBuf) -> Result<(), CliError> {
    let initial = load_config(&path)?;
    let handle = ConfigHandle::new(initial);
    tracing::info!(path = %path.display(), "Configuration loaded, watching for changes");

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    // The notify watcher stops when dropped; keep it alive for the loop.
    let _watcher = watcher.run().map_err(CliError::Watch)?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                match update {
                    Some(config) => {
                        handle.replace(config);
                        let snapshot = handle.snapshot();
                        tracing::info!(
                            port = snapshot.dev_server.port,
                            cache_rules = snapshot.cache.rules.len(),
                            "Configuration reloaded"
                        );
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

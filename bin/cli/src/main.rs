use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::Console;
use directories::ProjectDirs;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use types::{config::ConsoleConfig, errors::ConsoleError, participant::ParticipantId};
use wallet::mock::MockBackend;

#[derive(Parser)]
#[command(name = "console")]
#[command(about = "QA console for multisig wallet workflows")]
#[command(version = "0.1.0")]
struct Cli {
    /// Directory to append daily log files to instead of logging to stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter 2-of-5 configuration file
    Init {
        #[arg(short, long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Load a configuration file and print the signer roster
    Check {
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Run the full workflow end-to-end against the mock wallet backend
    Drive {
        /// Config to drive with; defaults to the built-in starter setup
        #[arg(short, long)]
        path: Option<PathBuf>,
        /// Destination address for the proposal
        #[arg(long, default_value = "mock1qqsmoketest")]
        to: String,
        /// Amount in the smallest token unit
        #[arg(long, default_value_t = 500)]
        amount: u64,
        /// Participant ids to sign with; defaults to the first
        /// threshold-many
        #[arg(long, value_delimiter = ',')]
        signers: Vec<ParticipantId>,
    },
}

fn default_config_path() -> Result<PathBuf, ConsoleError> {
    let proj_dirs = ProjectDirs::from("", "", "MultisigConsole")
        .ok_or_else(|| ConsoleError::Config("Failed to determine project directory".to_string()))?;

    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)
        .map_err(|e| ConsoleError::Config(format!("Failed to create config directory: {e}")))?;

    Ok(config_dir.join("console.yaml"))
}

fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, ConsoleError> {
    match path {
        Some(p) => Ok(p),
        None => default_config_path(),
    }
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<(), ConsoleError> {
    let path = resolve_path(path)?;
    if path.exists() && !force {
        return Err(ConsoleError::Config(format!(
            "{} already exists, pass --force to overwrite",
            path.display()
        )));
    }

    ConsoleConfig::starter().save_to_file(&path)?;
    println!("Wrote starter config to {}", path.display());
    Ok(())
}

fn check_config(path: Option<PathBuf>) -> Result<(), ConsoleError> {
    let path = resolve_path(path)?;
    let config = ConsoleConfig::load_from_file(&path)?;

    println!(
        "{}-of-{} on {}",
        config.required_signatures,
        config.participant_count(),
        config.network
    );
    for i in 0..config.participant_count() {
        println!("  {i}: {}", config.participant_name(i));
    }
    Ok(())
}

async fn drive(
    path: Option<PathBuf>,
    to: String,
    amount: u64,
    signers: Vec<ParticipantId>,
) -> Result<(), ConsoleError> {
    let config = match path {
        Some(p) => ConsoleConfig::load_from_file(&p)?,
        None => ConsoleConfig::starter(),
    };

    let console = Console::new(config, Box::new(MockBackend::new()))?;
    let required = console.required_signatures();

    let signers: Vec<ParticipantId> = if signers.is_empty() {
        (0..required as ParticipantId).collect()
    } else {
        signers
    };

    for &id in &signers {
        let participant = console.participant(id).await?;
        println!("Starting {} ...", participant.name);
        console.start_participant(id).await?;

        let participant = console.participant(id).await?;
        println!(
            "  ready at {} with balance {}",
            participant.address.unwrap_or_default(),
            participant.balance.unwrap_or_default()
        );
    }

    let from = signers[0];
    let tx_hex = console.create_transaction(from, &to, amount).await?;
    println!("Proposal built: {} hex chars", tx_hex.len());

    for &id in &signers {
        console.toggle_signer(id).await?;
        console.collect_signature(id, &tx_hex).await?;

        let state = console.workflow().await;
        println!(
            "Collected {}/{required} signatures",
            state.quorum_progress()
        );
    }

    let signatures: Vec<String> = console
        .workflow()
        .await
        .signatures
        .iter()
        .map(|s| s.signature.clone())
        .collect();

    let hash = console.assemble_and_send(from, &tx_hex, &signatures).await?;
    println!("Broadcast accepted: {hash}");
    Ok(())
}

fn init_tracing(log_dir: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(log_dir) = log_dir {
        if !log_dir.exists() {
            if let Err(e) = fs::create_dir_all(log_dir) {
                eprintln!("Failed to create log directory {}: {e}", log_dir.display());
            }
        }

        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "console.log");
        registry
            .with(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true),
            )
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_dir.as_deref());

    match cli.command {
        Commands::Init { path, force } => init_config(path, force),
        Commands::Check { path } => check_config(path),
        Commands::Drive {
            path,
            to,
            amount,
            signers,
        } => drive(path, to, amount, signers).await,
    }
}

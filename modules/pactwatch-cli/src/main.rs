use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::ContractAnalyst;
use pactwatch_common::{Config, ContractRecord, InsertOutcome, PactwatchError};
use pactwatch_ingest::{extract_text, extractor_for, Ingestor};
use pactwatch_notify::{NoopBackend, NotifyBackend, NotifyRouter};
use pactwatch_registry::{classify, ContractStore};
use streamline_client::StreamlineClient;

mod hooks;
mod stats;

use hooks::ReviewAndNotifyHook;
use stats::SweepStats;

#[derive(Parser)]
#[command(name = "pactwatch")]
#[command(about = "Contract registry with expiry sweeps and review forwarding")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a contract document into the registry
    Add {
        /// Unique contract id
        #[arg(long)]
        id: String,

        /// Path to the contract document (PDF or plain text)
        file: PathBuf,
    },

    /// List all registered contracts in insertion order
    List,

    /// Sweep the registry and warn about soon-to-expire contracts
    Check {
        /// Days-to-expiry threshold; defaults from configuration
        #[arg(long)]
        threshold_days: Option<i64>,

        /// Reference date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        reference_date: Option<NaiveDate>,
    },

    /// Summarize a contract document with the analysis assistant
    Analyze { file: PathBuf },

    /// Insert the three demo contracts
    SeedDemo,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pactwatch=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.log_redacted();

    match cli.command {
        Commands::Add { id, file } => cmd_add(&config, &id, &file).await,
        Commands::List => cmd_list(&config),
        Commands::Check {
            threshold_days,
            reference_date,
        } => cmd_check(&config, threshold_days, reference_date).await,
        Commands::Analyze { file } => cmd_analyze(&config, &file).await,
        Commands::SeedDemo => cmd_seed_demo(&config),
    }
}

/// Router over the configured channels, or Noop when none are set.
fn notifier(config: &Config) -> Arc<dyn NotifyBackend> {
    match NotifyRouter::from_config(config) {
        Some(router) => Arc::new(router),
        None => {
            info!("No notification channel configured, notifications disabled");
            Arc::new(NoopBackend)
        }
    }
}

async fn cmd_add(config: &Config, id: &str, file: &Path) -> Result<()> {
    let store = ContractStore::new(&config.store_path);
    let review = config.streamline_url.as_deref().map(StreamlineClient::new);
    let hook = Arc::new(ReviewAndNotifyHook::new(review, notifier(config)));

    let ingestor = Ingestor::new(store, extractor_for(config.date_rule)).with_hook(hook);

    match ingestor.ingest(id, file).await {
        Ok(InsertOutcome::Recorded(record)) => {
            println!(
                "Recorded contract {} ({}), expires {}",
                record.id, record.file_name, record.expiry_date
            );
            Ok(())
        }
        Ok(InsertOutcome::Duplicate { id }) => {
            println!("Contract {id} already exists; registry unchanged");
            Ok(())
        }
        Err(PactwatchError::UnparseableDocument(reason)) => {
            println!("Not recorded: {reason}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_list(config: &Config) -> Result<()> {
    let store = ContractStore::new(&config.store_path);
    let records = store.load()?;

    if records.is_empty() {
        println!("No contracts in the registry.");
        return Ok(());
    }

    println!("{:<12} {:<32} {:<12} UPLOADED", "ID", "FILE", "EXPIRY");
    for record in records {
        println!(
            "{:<12} {:<32} {:<12} {}",
            record.id,
            record.file_name,
            record.expiry_date.to_string(),
            record.uploaded_at.format("%Y-%m-%dT%H:%M:%SZ"),
        );
    }
    Ok(())
}

async fn cmd_check(
    config: &Config,
    threshold_days: Option<i64>,
    reference_date: Option<NaiveDate>,
) -> Result<()> {
    let store = ContractStore::new(&config.store_path);
    let records = store.load()?;

    if records.is_empty() {
        println!("No contracts in the registry.");
        return Ok(());
    }

    let threshold_days = threshold_days.unwrap_or(config.threshold_days);
    let reference_date = reference_date.unwrap_or_else(|| Local::now().date_naive());
    let flagged = classify(&records, reference_date, threshold_days);

    let mut stats = SweepStats {
        contracts_scanned: records.len() as u64,
        flagged: flagged.len() as u64,
        warnings_sent: 0,
    };

    let notifier = notifier(config);
    for expiring in &flagged {
        println!(
            "{}  {}  expires {} ({} days left)",
            expiring.record.id,
            expiring.record.file_name,
            expiring.record.expiry_date,
            expiring.days_left,
        );
        if notifier.send_expiry_warning(expiring).await.is_ok() {
            stats.warnings_sent += 1;
        }
    }

    info!("Sweep complete. {stats}");
    println!("{stats}");
    Ok(())
}

async fn cmd_analyze(config: &Config, file: &Path) -> Result<()> {
    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is required for analyze"))?;

    let text = extract_text(file)?;
    let analyst = ContractAnalyst::new(api_key, config.openai_model.as_deref());
    let analysis = analyst.analyze(&text).await?;

    println!("{analysis}");
    Ok(())
}

fn cmd_seed_demo(config: &Config) -> Result<()> {
    let store = ContractStore::new(&config.store_path);
    let demo = [
        ("001", "contract_vendorA.pdf", "2025-12-15"),
        ("002", "contract_vendorB.pdf", "2025-10-05"),
        ("003", "contract_vendorC.pdf", "2026-01-01"),
    ];

    for (id, file_name, expiry) in demo {
        let expiry_date = NaiveDate::parse_from_str(expiry, "%Y-%m-%d")?;
        let candidate = ContractRecord::new(id, file_name, expiry_date, Utc::now());
        match store.admit(candidate)? {
            InsertOutcome::Recorded(record) => {
                println!("Recorded {} ({})", record.id, record.file_name)
            }
            InsertOutcome::Duplicate { id } => println!("Contract {id} already exists; skipped"),
        }
    }
    Ok(())
}

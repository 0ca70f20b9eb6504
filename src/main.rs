use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use psp_tasks::application::onboarding::OnboardingService;
use psp_tasks::domain::ports::GatewayAccountStoreBox;
use psp_tasks::domain::task::JourneyContext;
use psp_tasks::infrastructure::in_memory::InMemoryAccountStore;
#[cfg(feature = "storage-rocksdb")]
use psp_tasks::infrastructure::rocksdb::RocksDBStore;
use psp_tasks::interfaces::json::account_reader::AccountReader;
use psp_tasks::interfaces::json::task_writer::{TaskListReport, TaskListWriter};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Journey {
    Creating,
    Switching,
}

impl From<Journey> for JourneyContext {
    fn from(journey: Journey) -> Self {
        match journey {
            Journey::Creating => JourneyContext::Creating,
            Journey::Switching => JourneyContext::Switching,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gateway account snapshots, one JSON object per line
    input: PathBuf,

    /// External id of the service the accounts belong to
    #[arg(long)]
    service: String,

    /// Journey to build task lists for
    #[arg(long, value_enum, default_value_t = Journey::Creating)]
    context: Journey,

    /// Only report on this gateway account
    #[arg(long)]
    account: Option<String>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn open_store(db_path: Option<PathBuf>) -> Result<GatewayAccountStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(path) => {
            tracing::warn!(
                path = %path.display(),
                "Persistent storage requested via --db-path, but the storage-rocksdb feature is not enabled. Falling back to in-memory storage."
            );
            Ok(Box::new(InMemoryAccountStore::new()))
        }
        None => Ok(Box::new(InMemoryAccountStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let service = OnboardingService::new(open_store(cli.db_path)?);
    let context = JourneyContext::from(cli.context);

    // Load account snapshots
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = AccountReader::new(file);
    for account in reader.accounts() {
        match account {
            Ok(account) => service.load_account(account).await.into_diagnostic()?,
            Err(e) => error!(error = %e, "Error reading account"),
        }
    }

    let account_ids = match cli.account {
        Some(id) => vec![id],
        None => service
            .accounts()
            .await
            .into_diagnostic()?
            .into_iter()
            .map(|account| account.external_id)
            .collect(),
    };

    // Output one task list per account
    let stdout = io::stdout();
    let mut writer = TaskListWriter::new(stdout.lock());
    for id in &account_ids {
        match service.task_list(id, &cli.service, context).await {
            Ok(tasks) => writer
                .write_report(&TaskListReport::new(id, &tasks))
                .into_diagnostic()?,
            Err(e) => error!(account = %id, error = %e, "Error building task list"),
        }
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}

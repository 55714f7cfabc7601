use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payswitch::application::launcher::PaymentLauncher;
use payswitch::application::reconciler::ReturnReconciler;
use payswitch::domain::payment::{AuthRequestParams, PaymentPendingRequest, PaymentType};
use payswitch::domain::ports::{PendingRequestStoreBox, SwitchGatewayRef};
use payswitch::domain::switch::{HostContext, ReturnPayload};
use payswitch::infrastructure::file::JsonFilePendingStore;
use payswitch::infrastructure::in_memory::InMemorySwitchGateway;
use payswitch::interfaces::json::result_writer::ResultWriter;
use payswitch::logging::init_logging;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file holding pending requests between runs
    #[arg(long, global = true, default_value = ".payswitch/pending.json")]
    state: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Name the pending request is stored under
    #[arg(long, global = true, default_value = "default")]
    session: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a browser switch and persist the pending request
    Launch {
        #[arg(long)]
        approval_url: String,
        #[arg(long)]
        success_url: String,
        /// Scheme the browser returns to
        #[arg(long)]
        return_scheme: String,
        /// Schemes the host has registered a handler for
        #[arg(long)]
        declare_scheme: Vec<String>,
        #[arg(long, default_value = "com.example.app")]
        package: String,
        /// Simulate a host without an installed browser
        #[arg(long)]
        no_browser: bool,
        #[arg(long)]
        billing_agreement: bool,
        #[arg(long)]
        client_metadata_id: Option<String>,
        #[arg(long)]
        merchant_account_id: Option<String>,
        #[arg(long)]
        intent: Option<String>,
    },
    /// Reconcile a return deep link against the pending request
    Return {
        /// Deep link the app was opened with
        #[arg(long)]
        url: Option<String>,
    },
}

fn open_store(cli: &Cli) -> Result<PendingRequestStoreBox> {
    if let Some(db_path) = &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        {
            use payswitch::infrastructure::rocksdb::RocksDBPendingStore;
            let store = RocksDBPendingStore::open(db_path).into_diagnostic()?;
            return Ok(Box::new(store));
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        tracing::warn!(
            path = %db_path.display(),
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to the JSON file store."
        );
    }
    Ok(Box::new(JsonFilePendingStore::new(&cli.state)))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = open_store(&cli)?;
    let gateway: SwitchGatewayRef = Arc::new(InMemorySwitchGateway::new());
    let stdout = io::stdout();
    let mut writer = ResultWriter::new(stdout.lock());

    match cli.command {
        Command::Launch {
            approval_url,
            success_url,
            return_scheme,
            declare_scheme,
            package,
            no_browser,
            billing_agreement,
            client_metadata_id,
            merchant_account_id,
            intent,
        } => {
            let ctx = declare_scheme
                .into_iter()
                .fold(HostContext::new(package), |ctx, scheme| ctx.declare_scheme(scheme))
                .browser_available(!no_browser);

            let mut params = AuthRequestParams::new(approval_url, success_url, return_scheme);
            if billing_agreement {
                params = params.payment_type(PaymentType::BillingAgreement);
            }
            if let Some(id) = client_metadata_id {
                params = params.client_metadata_id(id);
            }
            if let Some(id) = merchant_account_id {
                params = params.merchant_account_id(id);
            }
            if let Some(intent) = intent {
                params = params.intent(intent);
            }

            let launcher = PaymentLauncher::new(gateway);
            match launcher.launch(&ctx, &params).await {
                PaymentPendingRequest::Started(request) => {
                    store.save(&cli.session, &request).await.into_diagnostic()?;
                    writer.write_pending(&request).into_diagnostic()?;
                }
                PaymentPendingRequest::Failure(error) => {
                    eprintln!("{}", error);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Return { url } => {
            let Some(request) = store.peek(&cli.session).await.into_diagnostic()? else {
                eprintln!("No pending request for session {}", cli.session);
                return Ok(ExitCode::FAILURE);
            };

            let payload = ReturnPayload { data: url };
            let reconciler = ReturnReconciler::new(gateway);
            let result = reconciler
                .reconcile(&PaymentPendingRequest::Started(request), &payload)
                .await
                .into_diagnostic()?;

            // Only a matched return consumes the token; the user may still be in the browser.
            if result.is_some() {
                store.take(&cli.session).await.into_diagnostic()?;
            }
            writer.write_result(result.as_ref()).into_diagnostic()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

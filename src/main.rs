//! bankcore - two-service ledger demo
//!
//! One binary hosts both services on separate listeners:
//!
//! ```text
//! ┌────────────────┐   settlement    ┌────────────────┐
//! │  transaction   │────────────────▶│    account     │
//! │  service :8082 │  (bearer HTTP)  │  service :8081 │
//! └───────┬────────┘                 └───────┬────────┘
//!         ▼                                  ▼
//!   transactions_tb                     accounts_tb
//! ```
//!
//! The transaction side never touches the account database directly; every
//! balance change crosses the HTTP boundary through the settlement probe.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use bankcore::account::{self, AccountLedger};
use bankcore::config::AppConfig;
use bankcore::db::Database;
use bankcore::settlement::{
    AccountProbe, DirectTransport, HttpTokenSource, OpenCircuitTransport, SettlementTransport,
};
use bankcore::transaction::{self, TransactionOrchestrator, TransactionStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

async fn serve(name: &str, host: &str, port: u16, app: axum::Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid {} listen address", name))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {} on {}", name, addr))?;

    tracing::info!("{} service listening on http://{}", name, addr);

    axum::serve(listener, app.into_make_service())
        .await
        .with_context(|| format!("{} service terminated", name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = bankcore::logging::init_logging(&config);

    tracing::info!(
        "Starting bankcore {} ({}) in {} mode",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    // Account service: private pool + ledger + router
    let account_db = Database::connect(
        &config.account_service.postgres_url,
        config.account_service.db_max_connections,
    )
    .await
    .context("Failed to connect to account database")?;
    account_db
        .health_check()
        .await
        .context("Account database health check failed")?;
    let ledger = Arc::new(AccountLedger::new(account_db.pool().clone()));
    let account_app = account::api::router(ledger);

    // Transaction service: private pool + settlement client + router
    let txn_db = Database::connect(
        &config.transaction_service.postgres_url,
        config.transaction_service.db_max_connections,
    )
    .await
    .context("Failed to connect to transaction database")?;
    txn_db
        .health_check()
        .await
        .context("Transaction database health check failed")?;

    let settlement = &config.transaction_service.settlement;
    let transport: Arc<dyn SettlementTransport> = if settlement.circuit_open {
        tracing::warn!("Settlement circuit is OPEN - all settlements will fail fast");
        Arc::new(OpenCircuitTransport)
    } else {
        Arc::new(
            DirectTransport::new(
                settlement.account_service_url.clone(),
                Duration::from_millis(settlement.request_timeout_ms),
            )
            .context("Failed to build settlement HTTP client")?,
        )
    };
    let tokens = Arc::new(HttpTokenSource::new(
        reqwest::Client::builder()
            .timeout(Duration::from_millis(settlement.request_timeout_ms))
            .build()
            .context("Failed to build token HTTP client")?,
        settlement.token_url.clone(),
        settlement.client_id.clone(),
        settlement.client_secret.clone(),
    ));
    let probe = AccountProbe::new(transport, tokens);
    let orchestrator = Arc::new(TransactionOrchestrator::new(
        TransactionStore::new(txn_db.pool().clone()),
        probe,
    ));
    let txn_app = transaction::api::router(orchestrator);

    tokio::try_join!(
        serve(
            "account",
            &config.account_service.host,
            config.account_service.port,
            account_app,
        ),
        serve(
            "transaction",
            &config.transaction_service.host,
            config.transaction_service.port,
            txn_app,
        ),
    )?;

    Ok(())
}

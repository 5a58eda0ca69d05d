#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::config::{AppConfig, CliArgs};
use cli::summary;
use cli::telemetry::init_telemetry;
use nearmint::{
    Dispatcher, Endpoint, EndpointPool, HttpTransport, IdentifierGenerator, Provisioner,
    RelayerClient, RelayerRoutes, RetryPolicy, Runner, Session,
};

// Using mimalloc for a smaller, faster allocator in musl builds.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    // One cookie jar for the whole process, shared by every endpoint.
    let session = Session::new();
    let query: Dispatcher<HttpTransport> = Dispatcher::new(
        EndpointPool::http(&config.rpc_endpoints, &config.transport, &session)?,
        RetryPolicy::QUERY,
    );
    let relayer = RelayerClient::new(
        Endpoint::new(
            config.relayer_url.clone(),
            HttpTransport::new(&config.transport, &session)?,
        ),
        RetryPolicy::RELAYER,
        RelayerRoutes::default(),
    );
    let generator: IdentifierGenerator = IdentifierGenerator::default();
    let runner = Runner::new(
        Provisioner::new(query, relayer),
        generator,
        config.run.clone(),
    );

    let report = if config.is_bulk() {
        if config.handle.is_some() {
            tracing::warn!("HANDLE is ignored in bulk mode");
        }
        runner.run_many().await
    } else {
        match runner.run_one(config.handle.clone()).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Provisioning failed: {e}");
                return Err(anyhow::Error::from(e).context("provisioning failed"));
            }
        }
    };

    print!("{}", summary::render(&report, &config.run.output_path));

    if let Some(e) = report.persist_error {
        return Err(anyhow::Error::from(e).context("result document was not written"));
    }
    Ok(())
}

fn log_startup_info(config: &AppConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting with full config: {:#?}", config);
    } else {
        tracing::info!(
            bulk = config.run.count,
            prefix = %config.run.prefix,
            endpoints = config.rpc_endpoints.len(),
            "Starting provisioning run"
        );
    }
}

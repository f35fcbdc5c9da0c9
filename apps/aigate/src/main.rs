use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tonic::transport::Server;
use tracing::info;

mod cli;

use aigate_common::Settings;
use aigate_core::auth::ApiKeyGate;
use aigate_core::pb::FILE_DESCRIPTOR_SET;
use aigate_core::pb::ai_service_server::AiServiceServer;
use aigate_core::pb::health_service_server::HealthServiceServer;
use aigate_core::service::{AiGrpcService, HealthGrpcService};

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("aigate failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Best-effort: a missing .env file is not an error.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let settings = Arc::new(Settings::from_env());
    info!(
        openai = settings.openai_api_key.is_some(),
        anthropic = settings.anthropic_api_key.is_some(),
        google = settings.google_api_key.is_some(),
        accepted_keys = settings.accepted_api_keys.len(),
        "settings loaded"
    );

    let gate = ApiKeyGate::from_settings(&settings);
    let ai_service = AiGrpcService::new(settings.clone(), gate.clone());
    let health_service = HealthGrpcService::new(gate);

    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let addr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!(addr = %addr, "listening");
    Server::builder()
        .add_service(reflection)
        .add_service(AiServiceServer::new(ai_service))
        .add_service(HealthServiceServer::new(health_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;
    info!("shutdown complete");

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("aigate=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
}

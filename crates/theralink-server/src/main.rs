use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use theralink_bedrock::client::load_sdk_config;
use theralink_bedrock::generator::BedrockGenerator;
use theralink_bedrock::summary::SummaryService;
use theralink_server::config::{ServerConfig, StoreKind};
use theralink_server::state::AppState;
use theralink_storage::client::client_from_config;
use theralink_storage::memory::MemoryStore;
use theralink_storage::s3::S3Store;
use theralink_storage::store::TriageStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let sdk_config = load_sdk_config(&config.region).await;

    let store: Arc<dyn TriageStore> = match config.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; records are lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreKind::S3 => {
            tracing::info!(bucket = %config.bucket, "using S3 store");
            Arc::new(S3Store::new(client_from_config(&sdk_config), &config.bucket))
        }
    };

    let generator = BedrockGenerator::new(&sdk_config, config.generation.clone())?;
    let summaries = SummaryService::new(Arc::new(generator), config.generation.timeout);
    let state = AppState::new(store, summaries)?;
    let app = theralink_server::app(state);

    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %config.bind,
        model_id = %config.generation.model_id,
        "listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

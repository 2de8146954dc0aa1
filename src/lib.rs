pub mod cli;
pub mod error;
pub mod labels;
pub mod model;
pub mod postprocess;
pub mod preprocess;
pub mod server;
pub mod service;

pub use crate::cli::Args;
pub use crate::error::{LoadError, PredictError};
pub use crate::labels::load_labels;
pub use crate::model::load_session;
pub use crate::postprocess::Prediction;
pub use crate::preprocess::{PreprocessConfig, Processor};
pub use crate::server::{AppState, create_router};
pub use crate::service::ClassifierService;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Load the model, then serve. A failed load is logged and the server comes
/// up anyway in degraded mode, answering every prediction with an error body.
pub async fn run(args: Args) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fashion_api=info,tower_http=info".into()),
        )
        .init();

    let classifier = match ClassifierService::load(&args) {
        Ok(classifier) => {
            info!(labels = classifier.labels().len(), model = %args.model, "model loaded");
            Some(classifier)
        }
        Err(e) => {
            error!("failed to load model or labels: {e}");
            None
        }
    };

    let state = Arc::new(AppState { classifier });
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use wiki_api::store::{FileStore, MemoryStore};
use wiki_api::{Config, Error, Server, app, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wiki-api: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("wiki-api: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let server = Server::bind(config.listen_addr).await?;

    match &config.data_file {
        Some(path) => {
            let store = FileStore::open(path).await?;
            info!(path = %store.path().display(), "article store ready");
            server.serve(app(Arc::new(store))).await
        }
        None => {
            info!("article store ready (in memory)");
            server.serve(app(Arc::new(MemoryStore::new()))).await
        }
    }
}

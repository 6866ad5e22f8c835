use misogi::auth::HttpAuth;
use misogi::remote::HttpRemote;
use misogi::{router, AppState, Config, SyncController};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let controller = match &config.remote {
        Some(remote) => {
            info!("remote sync enabled at {}", remote.base_url);
            let store = Arc::new(HttpRemote::new(&remote.base_url, remote.auth_token.clone())?);
            let auth = Arc::new(HttpAuth::new(&remote.base_url, remote.auth_token.clone())?);
            SyncController::with_remote(config.data_path.clone(), store, auth).await
        }
        None => SyncController::local(config.data_path.clone()).await,
    };

    let app = router(AppState::new(controller));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

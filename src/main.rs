use std::{env, net::SocketAddr};

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use resume_counter::config::CounterConfig;
use resume_counter::{AppState, CounterBackend, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let state = match CounterConfig::from_env() {
        Ok(config) => {
            info!("counter store at {}", config.container_path().display());
            AppState::new(Ok(CounterBackend::new(config)))
        }
        Err(err) => {
            // Keep serving: every counter call reports this as a structured
            // failure instead of the process dying.
            error!("counter backend unavailable: {err}");
            AppState::new(Err(err))
        }
    };

    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use tokio::net::TcpListener;

use pantry::logger::Logger;
use pantry::utils::browser;
use pantry::{router, AppState, Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env();
    let addr = config.socket_addr();
    let home_url = config.home_url();
    let open_browser = config.open_browser;

    let state = AppState::new(config)?;
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("Pantry listening on http://{}", addr);

    if open_browser {
        browser::open(&home_url);
    }

    axum::serve(listener, app).await.map_err(WikiError::from)
}

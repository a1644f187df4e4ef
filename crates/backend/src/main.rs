use std::net::SocketAddr;

use axum::http::{header, Method};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use backend::shared::{config, data::db};
use backend::system::{self, auth::jwt, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;

    // `wcs-backend token <username>` prints an admin token and exits
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("token") {
        let username = args.get(2).map(String::as_str).unwrap_or("admin");
        let token = jwt::issue_admin_token(&config.security, username)?;
        println!("{}", token);
        return Ok(());
    }

    let db_path = config::get_database_path(&config)?;
    let conn = db::initialize_database(Some(db_path.to_string_lossy().as_ref()))
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
    tracing::info!("Database ready at {}", db_path.display());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, conn)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = backend::routes::configure_routes(state).layer(cors);

    tracing::info!("Listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

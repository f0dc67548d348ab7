mod admin_site;
mod config;
mod database;
mod embedded;
mod hosts;
mod project_site;
mod projects;
mod root_site;
mod state;
mod views;

use axum::Router;
use axum_server::Handle;
use showcase_identity::{identity_routes, IdentityService, IdentityState};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = config::Config::load_or_default();

    // Initialize logging with configured level
    let log_level = config.logging.level.to_lowercase();
    let env_filter = match log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(env_filter)
        .init();

    tracing::info!("Starting Bot Showcase Server");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Host: {}, port: {}", config.server.host, config.server.port);
    tracing::info!("  Root domain: {}", config.identity.domains.root);
    tracing::info!("  Identity domain: {}", config.identity.domains.identity);
    tracing::info!("  Admin domain: {}", config.identity.domains.admin);
    tracing::info!("  Project suffix: {}", config.identity.domains.project_suffix);
    tracing::info!("  Log level: {}", config.logging.level);

    // Initialize the project database, seeding from the CSV when present
    let db = database::init_database(Path::new(&config.projects.database_path))?;
    let csv_path = Path::new(&config.projects.csv_path);
    if csv_path.exists() {
        let items = projects::read_csv(csv_path)?;
        tracing::info!(
            "Importing {} projects from {}",
            items.len(),
            config.projects.csv_path
        );
        let mut conn = db.lock().await;
        database::replace_projects(&mut conn, &items)?;
    }

    let registry = Arc::new(projects::ProjectRegistry::new());
    registry.reload(&db).await?;
    tracing::info!("Loaded {} projects", registry.snapshot().await.len());

    // Identity host state: OAuth client plus the cookie encryption key
    let identity_service = Arc::new(IdentityService::new(config.identity.clone())?);
    let identity_state = IdentityState::new(identity_service.clone());

    let config = Arc::new(config);
    let app_state = AppState::new(
        config.clone(),
        registry.clone(),
        identity_service.cookie_key(),
    );

    // One router per host class; session routes ride along everywhere the
    // shared cookie is consumed rather than produced
    let root: Router = root_site::routes()
        .merge(hosts::session_routes())
        .with_state(app_state.clone());
    let admin: Router = admin_site::routes()
        .merge(hosts::session_routes())
        .with_state(app_state.clone());
    let project: Router = project_site::routes()
        .merge(hosts::session_routes())
        .with_state(app_state.clone());
    let identity: Router = identity_routes().with_state(identity_state);

    let app = hosts::app(hosts::HostRouters {
        domains: config.identity.domains.clone(),
        root,
        identity,
        admin,
        project,
    })
    .layer(TraceLayer::new_for_http());

    let ip_addr = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to parse host '{}': {}. Using 0.0.0.0",
                config.server.host,
                e
            );
            [0, 0, 0, 0].into()
        });
    let addr = SocketAddr::from((ip_addr, config.server.port));

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Goodbye");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM, then drain in-flight requests with a
/// two minute cap before the listener closes.
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(Duration::from_secs(120)));
}

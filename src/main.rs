use dotenvy::dotenv;
use gearlend::gearlend_config::ServerConfig;
use gearlend::logging::init_tracing;
use gearlend::metrics::{init_metrics, metrics_app};
use gearlend::router::init_router;
use gearlend::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let metrics_handle = init_metrics();

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize application state");
            eprintln!("❌ Failed to start: {:#}", e);
            std::process::exit(1);
        }
    };

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let server_config = ServerConfig::from_env();
    let listener = match tokio::net::TcpListener::bind(&server_config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("❌ Failed to bind {}: {}", server_config.bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server_config.bind_addr, "server listening");
    println!("🚀 Server running on http://{}", server_config.bind_addr);
    println!("📚 Swagger UI available at /swagger-ui");
    println!("📖 Scalar UI available at /scalar");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

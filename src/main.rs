use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use posledger::config::{AppConfig, Config, LogFormat};
use posledger::middleware::{ErrorHandler, RequestId};
use posledger::modules::balances::MySqlStartingBalanceRepository;
use posledger::modules::health;
use posledger::modules::ledger::MySqlLedgerRepository;
use posledger::modules::orders::MySqlOrderRepository;
use posledger::modules::reports::{self, ReportService};

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("posledger={},actix_web=info", app.log_level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET"])
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config.app);

    tracing::info!("Starting POS Ledger reporting service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({}..{} connections)",
        config.database.pool_size,
        config.database.max_connections
    );

    if config.database.run_migrations {
        config
            .database
            .run_migrations(&db_pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations applied");
    }

    let report_service = Arc::new(ReportService::new(
        Arc::new(MySqlOrderRepository::new(db_pool.clone())),
        Arc::new(MySqlLedgerRepository::new(db_pool.clone())),
        Arc::new(MySqlStartingBalanceRepository::new(db_pool.clone())),
        config.report.clone(),
    ));

    let bind_address = config.server.bind_address();
    let cors_origin = config.app.cors_allowed_origin.clone();
    if cors_origin.is_none() && config.is_production() {
        tracing::warn!("CORS_ALLOWED_ORIGIN is not set, accepting requests from any origin");
    }

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(cors_origin.as_deref()))
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .configure(health::configure)
            .configure(reports::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}

//! tutor-booking server.
//!
//! Loads configuration, connects storage (PostgreSQL, or process memory when
//! no database URL is set outside production), starts the completion sweep
//! scheduler and serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tutor_booking::adapters::events::{InMemoryEventBus, TracingEventHandler, BOOKING_EVENT_TYPES};
use tutor_booking::adapters::memory::InMemoryDirectory;
use tutor_booking::adapters::postgres;
use tutor_booking::adapters::scheduler::{SweepSchedule, SweepScheduler};
use tutor_booking::app::{BookingApp, BookingPorts};
use tutor_booking::config::{AppConfig, LogFormat};
use tutor_booking::ports::EventSubscriber;

/// Published events kept in memory for inspection.
const EVENT_RETENTION: usize = 1_000;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("Invalid configuration")?;

    tracing::info!(environment = ?config.server.environment, "starting tutor-booking");

    let bus = Arc::new(InMemoryEventBus::with_retention(EVENT_RETENTION));
    bus.subscribe_all(&BOOKING_EVENT_TYPES, Arc::new(TracingEventHandler));

    let ports = if config.database.is_configured() {
        tracing::info!("connecting to database");
        let pool = postgres::connect(&config.database)
            .await
            .context("Failed to connect to database")?;
        if config.database.run_migrations {
            tracing::info!("running database migrations");
            postgres::migrate(&pool)
                .await
                .context("Failed to run migrations")?;
        }
        BookingPorts::postgres(pool, bus.clone())
    } else {
        tracing::warn!("no database URL configured, using in-memory storage");
        BookingPorts::in_memory(Arc::new(InMemoryDirectory::new()), bus.clone())
    };

    let app = BookingApp::new(&ports);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler_task = if config.scheduler.enabled {
        let schedule = SweepSchedule::from_config(&config.scheduler)
            .context("Invalid scheduler configuration")?;
        let scheduler = SweepScheduler::new(app.sweep.clone(), schedule)
            .with_run_on_startup(config.scheduler.run_on_startup);
        Some(tokio::spawn(async move { scheduler.run(shutdown_rx).await }))
    } else {
        tracing::info!("completion sweep scheduler disabled");
        None
    };

    let addr = config.server.socket_addr().context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app.router(config.server.request_timeout()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Receivers may already be gone if the scheduler is disabled.
    let _ = shutdown_tx.send(true);
    if let Some(task) = scheduler_task {
        task.await.context("Scheduler task panicked")?;
    }

    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

//! Process-wide logging, error reporting and shutdown handling for the
//! admin binary.

use std::borrow::Cow;

use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AdminConfig;

const DEFAULT_FILTER: &str = "gemvault_admin=info,tower_http=debug";

/// Start Sentry (when a DSN is configured) and install the tracing
/// subscriber. The returned guard flushes Sentry on drop and must outlive
/// the server.
pub fn init(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    // Sentry first so the tracing layer below has a client to report to.
    let guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: config.sentry_environment.clone().map(Cow::Owned),
                sample_rate: config.sentry_sample_rate,
                traces_sample_rate: config.sentry_traces_sample_rate,
                attach_stacktrace: true,
                send_default_pii: false,
                ..Default::default()
            },
        ))
    });

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON lines on Fly.io, human-readable text elsewhere.
    let structured = std::env::var("FLY_APP_NAME").is_ok();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(structured.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true)))
        .with((!structured).then(tracing_subscriber::fmt::layer))
        .with(sentry_tracing::layer().event_filter(|metadata| event_filter(*metadata.level())))
        .init();

    if guard.is_some() {
        tracing::info!("Sentry initialized");
    }
    guard
}

/// Warnings and errors become Sentry events; info and debug are kept as
/// breadcrumbs.
const fn event_filter(level: Level) -> EventFilter {
    match level {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Resolve on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_filter_levels() {
        assert!(matches!(event_filter(Level::ERROR), EventFilter::Event));
        assert!(matches!(event_filter(Level::WARN), EventFilter::Event));
        assert!(matches!(event_filter(Level::INFO), EventFilter::Breadcrumb));
        assert!(matches!(event_filter(Level::TRACE), EventFilter::Ignore));
    }
}

//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the Ticketry application.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "ticketry.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log account actions with structured data
pub fn log_account_action(user_id: uuid::Uuid, action: &str, details: Option<&str>) {
    info!(
        user_id = %user_id,
        action = action,
        details = details,
        "Account action performed"
    );
}

/// Log event management actions
pub fn log_event_action(event_id: uuid::Uuid, action: &str, user_id: uuid::Uuid, details: Option<&str>) {
    info!(
        event_id = %event_id,
        action = action,
        user_id = %user_id,
        details = details,
        "Event action performed"
    );
}

/// Log external API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    warn!(
        api = api,
        error = error,
        context = context,
        "External API error occurred"
    );
}

use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Pool sizing and lifetimes taken from [`DatabaseConfig`]
fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
}

/// Open the prompt store's pool and wait for its first connection
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        database = %config.describe(),
        max_connections = config.max_connections,
        "Connecting to PostgreSQL"
    );

    pool_options(config)
        .connect_with(config.connect_options.clone())
        .await
        .inspect_err(|e| tracing::error!("Failed to connect to {}: {}", config.describe(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_options_follow_config() {
        let config = DatabaseConfig {
            connect_options: DatabaseConfig::options_from_parts("u", "p", "localhost", 5432, "db"),
            max_connections: 7,
            min_connections: 2,
            acquire_timeout_secs: 3,
            idle_timeout_secs: 60,
            max_lifetime_secs: 120,
        };

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 7);
        assert_eq!(options.get_min_connections(), 2);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(120)));
    }
}

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Connect using the pool settings from `configs`.
pub async fn connect_with_config(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(max_connections = cfg.max_connections, min_connections = cfg.min_connections, "database pool ready");
    Ok(db)
}

pub fn connect_options(cfg: &configs::DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    opt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_carry_pool_bounds() {
        let cfg = configs::DatabaseConfig {
            url: "postgres://localhost/marina".into(),
            max_connections: 7,
            min_connections: 3,
            ..Default::default()
        };
        let opt = connect_options(&cfg);
        assert_eq!(opt.get_url(), "postgres://localhost/marina");
        assert_eq!(opt.get_max_connections(), Some(7));
        assert_eq!(opt.get_min_connections(), Some(3));
        assert_eq!(opt.get_acquire_timeout(), Some(Duration::from_secs(30)));
    }
}

use sqlx::postgres::PgPool;

use shared_config::AppConfig;

/// Process-wide state handed to every router: the connection pool and the
/// read-only configuration. Cloning is cheap; the pool is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: AppConfig,
}

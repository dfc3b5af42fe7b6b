use crate::{
    api,
    store::{PgUserStore, UserStore},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable, the schema cannot be applied, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(args.dsn.expose_secret())
        .await
        .context("Failed to connect to database")?;

    let store = PgUserStore::new(pool);

    store
        .apply_schema()
        .await
        .context("Failed to apply database schema")?;

    info!("Database ready");

    let store: Arc<dyn UserStore> = Arc::new(store);

    api::new(args.port, store).await
}

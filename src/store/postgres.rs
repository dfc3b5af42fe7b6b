use super::{StoreError, User, UserStore};
use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row, postgres::PgRow};
use tracing::{Instrument, debug, info_span};

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the schema statements fail.
    pub async fn apply_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .instrument(info_span!("db.schema", db.system = "postgresql"))
            .await?;

        debug!("Schema applied");

        Ok(())
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password: row.get("password"),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn exists(&self, email: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS exists")
            .bind(email)
            .fetch_one(&self.pool)
            .instrument(info_span!(
                "db.query",
                db.system = "postgresql",
                db.operation = "SELECT"
            ))
            .await?;

        Ok(row.get("exists"))
    }

    async fn insert(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id, email, password",
        )
        .bind(email)
        .bind(password)
        .fetch_one(&self.pool)
        .instrument(info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT"
        ))
        .await;

        match result {
            Ok(row) => Ok(user_from_row(&row)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let row =
            sqlx::query("SELECT id, email, password FROM users WHERE email = $1 AND password = $2")
                .bind(email)
                .bind(password)
                .fetch_optional(&self.pool)
                .instrument(info_span!(
                    "db.query",
                    db.system = "postgresql",
                    db.operation = "SELECT"
                ))
                .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .instrument(info_span!(
                "db.acquire",
                db.system = "postgresql",
                db.operation = "ACQUIRE"
            ))
            .await?;

        conn.ping()
            .instrument(info_span!(
                "db.ping",
                db.system = "postgresql",
                db.operation = "PING"
            ))
            .await?;

        Ok(())
    }
}

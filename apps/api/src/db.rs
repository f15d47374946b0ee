use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// The reversible schema migration (companies, roles, users, applications, offers, milestones).
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Applies every pending migration.
pub async fn migrate_up(pool: &PgPool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    info!("Schema migrated up");
    Ok(())
}

/// Reverts every applied migration, dropping child tables before their parents.
pub async fn migrate_down(pool: &PgPool) -> Result<()> {
    MIGRATOR.undo(pool, 0).await?;
    info!("Schema migrated down");
    Ok(())
}

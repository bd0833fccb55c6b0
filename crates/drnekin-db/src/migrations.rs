//! # Database Migrations
//!
//! Embedded schema for drnekin-qr.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Database::new / ensure_initialized                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (create if missing)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       └── 001_initial_schema.sql   customers, visits, operations       │
//! │                                    + 5 indexes                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record in _sqlx_migrations           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Legacy Databases
//! Files written by earlier releases already contain the three tables but
//! no `_sqlx_migrations`. The initial script only uses `IF NOT EXISTS`, so
//! it is recorded as applied without touching existing rows.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent: safe to call before every operation.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn object_names(pool: &SqlitePool, kind: &str) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = ?1 AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .bind(kind)
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_schema_created() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let tables = object_names(db.pool(), "table").await;
        for table in ["customers", "operations", "visits"] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }

        let indexes = object_names(db.pool(), "index").await;
        for index in [
            "idx_customers_phone",
            "idx_customers_plate",
            "idx_operations_visit_id",
            "idx_visits_customer_id",
            "idx_visits_visit_date",
        ] {
            assert!(indexes.iter().any(|i| i == index), "missing index {index}");
        }
    }

    #[tokio::test]
    async fn test_run_twice_is_noop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        run_migrations(db.pool()).await.unwrap();
        db.ensure_initialized().await.unwrap();

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(applied as usize, MIGRATOR.migrations.len());
    }

    #[tokio::test]
    async fn test_legacy_schema_upgrades_in_place() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        // Shape written by earlier releases, without the migrations table.
        sqlx::raw_sql(
            "CREATE TABLE customers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_id TEXT NOT NULL UNIQUE,
                secret TEXT NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                phone TEXT NOT NULL DEFAULT '',
                plate TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            INSERT INTO customers (public_id, secret, name, created_at, updated_at)
            VALUES ('legacy01', 's', 'Old', '2024-05-01 08:00:00', '2024-05-01 08:00:00');",
        )
        .execute(db.pool())
        .await
        .unwrap();

        db.ensure_initialized().await.unwrap();

        let customer = db.customers().get_by_public_id("legacy01").await.unwrap();
        assert_eq!(customer.map(|c| c.name), Some("Old".to_string()));
    }
}

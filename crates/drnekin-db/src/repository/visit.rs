//! # Visit Repository
//!
//! Database operations for visits and their operations.
//!
//! ## Recording a Visit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(NewVisit { customer_id, visit_date, km, notes, operations })    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize: trim, blank date → today, drop blank-text operations        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   SINGLE TRANSACTION                            │   │
//! │  │  1. INSERT INTO visits ...           → visit_id                 │   │
//! │  │  2. INSERT INTO operations ... (one per remaining operation)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ← visit and operations appear together or not at all           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  touch customers.updated_at (separate statement, after commit)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Visits and operations are never updated; they go away only when their
//! customer is deleted (ON DELETE CASCADE).

use drnekin_core::{clock, NewVisit, Operation, Visit};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::customer::CustomerRepository;

/// Repository for visit and operation database operations.
#[derive(Debug, Clone)]
pub struct VisitRepository {
    pool: SqlitePool,
}

impl VisitRepository {
    /// Creates a new VisitRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VisitRepository { pool }
    }

    /// Records a visit and its operations, then touches the customer.
    ///
    /// ## Returns
    /// * `Ok(visit_id)` - The new visit's id
    /// * `Err(DbError::ForeignKeyViolation)` - `customer_id` doesn't exist
    pub async fn create(&self, input: NewVisit) -> DbResult<i64> {
        let input = input.normalized();
        let now = clock::utc_now();

        debug!(
            customer_id = input.customer_id,
            operations = input.operations.len(),
            "Creating visit"
        );

        let mut tx = self.pool.begin().await?;

        let visit_id = sqlx::query(
            r#"
            INSERT INTO visits (
                customer_id, visit_date, km, notes, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5
            )
            "#,
        )
        .bind(input.customer_id)
        .bind(&input.visit_date)
        .bind(&input.km)
        .bind(&input.notes)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for op in &input.operations {
            sqlx::query(
                r#"
                INSERT INTO operations (
                    visit_id, text, price, created_at
                ) VALUES (
                    ?1, ?2, ?3, ?4
                )
                "#,
            )
            .bind(visit_id)
            .bind(&op.text)
            .bind(&op.price)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(visit_id, "Visit committed");

        CustomerRepository::new(self.pool.clone())
            .touch_updated_at(input.customer_id)
            .await?;

        Ok(visit_id)
    }

    /// All visits of a customer, latest `visit_date` first; among visits on
    /// the same date the most recently created comes first.
    pub async fn list_for_customer(&self, customer_id: i64) -> DbResult<Vec<Visit>> {
        let visits = sqlx::query_as::<_, Visit>(
            r#"
            SELECT
                id,
                customer_id,
                visit_date,
                km,
                notes,
                created_at
            FROM visits
            WHERE customer_id = ?1
            ORDER BY visit_date DESC, id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(visits)
    }

    /// Operations of a visit in insertion order.
    pub async fn list_operations(&self, visit_id: i64) -> DbResult<Vec<Operation>> {
        let operations = sqlx::query_as::<_, Operation>(
            r#"
            SELECT
                id,
                visit_id,
                text,
                price,
                created_at
            FROM operations
            WHERE visit_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(visit_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(operations)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use drnekin_core::{Customer, NewCustomer};

    async fn setup() -> (Database, Customer) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = db
            .customers()
            .create(NewCustomer::new("Ada", "555", "34ABC"))
            .await
            .unwrap();
        (db, customer)
    }

    #[tokio::test]
    async fn test_blank_operations_are_skipped() {
        let (db, customer) = setup().await;

        let visit_id = db
            .visits()
            .create(
                NewVisit::for_customer(customer.id)
                    .visit_date("2026-01-31")
                    .operation(("Oil change", "100"))
                    .operation(("  ", "50"))
                    .operation(("Brake pad", "")),
            )
            .await
            .unwrap();

        let ops = db.visits().list_operations(visit_id).await.unwrap();
        let pairs: Vec<(&str, &str)> = ops
            .iter()
            .map(|o| (o.text.as_str(), o.price.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Oil change", "100"), ("Brake pad", "")]);
        assert!(ops.iter().all(|o| o.visit_id == visit_id));
        assert!(ops[0].id < ops[1].id);
    }

    #[tokio::test]
    async fn test_blank_date_defaults_to_today() {
        let (db, customer) = setup().await;

        db.visits()
            .create(NewVisit::for_customer(customer.id).km(" 120500 ").notes(" ok "))
            .await
            .unwrap();

        let visits = db.visits().list_for_customer(customer.id).await.unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].visit_date, clock::today());
        assert_eq!(visits[0].km, "120500");
        assert_eq!(visits[0].notes, "ok");
        assert_eq!(visits[0].customer_id, customer.id);
    }

    #[tokio::test]
    async fn test_create_touches_customer() {
        let (db, customer) = setup().await;

        sqlx::query("UPDATE customers SET updated_at = '2000-01-01 00:00:00' WHERE id = ?1")
            .bind(customer.id)
            .execute(db.pool())
            .await
            .unwrap();

        db.visits()
            .create(NewVisit::for_customer(customer.id))
            .await
            .unwrap();

        let after = db
            .customers()
            .get_by_public_id(&customer.public_id)
            .await
            .unwrap()
            .unwrap();
        assert!(after.updated_at >= customer.updated_at);
        assert!(after.updated_at.as_str() > "2000-01-01 00:00:00");
    }

    #[tokio::test]
    async fn test_visits_ordered_by_date_then_newest() {
        let (db, customer) = setup().await;
        let visits = db.visits();

        let a = visits
            .create(NewVisit::for_customer(customer.id).visit_date("2026-01-10"))
            .await
            .unwrap();
        let b = visits
            .create(NewVisit::for_customer(customer.id).visit_date("2026-03-01"))
            .await
            .unwrap();
        let c = visits
            .create(NewVisit::for_customer(customer.id).visit_date("2026-01-10"))
            .await
            .unwrap();

        let ids: Vec<i64> = visits
            .list_for_customer(customer.id)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![b, c, a]);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_foreign_key_violation() {
        let (db, _) = setup().await;

        let err = db
            .visits()
            .create(NewVisit::for_customer(404).operation(("Oil", "1")))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{err:?}");
        assert!(db.visits().list_for_customer(404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_operation_rolls_back_visit() {
        let (db, customer) = setup().await;

        sqlx::raw_sql(
            "CREATE TRIGGER reject_boom BEFORE INSERT ON operations
             WHEN NEW.text = 'boom'
             BEGIN SELECT RAISE(ABORT, 'boom rejected'); END;",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let result = db
            .visits()
            .create(
                NewVisit::for_customer(customer.id)
                    .operation(("fine", ""))
                    .operation(("boom", "")),
            )
            .await;

        assert!(result.is_err());
        assert!(db
            .visits()
            .list_for_customer(customer.id)
            .await
            .unwrap()
            .is_empty());

        let stray: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM operations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stray, 0);
    }

    #[tokio::test]
    async fn test_closed_database_is_storage_unavailable() {
        let (db, customer) = setup().await;
        db.close().await;

        let err = db
            .visits()
            .create(NewVisit::for_customer(customer.id).operation(("Oil change", "100")))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::StorageUnavailable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_delete_customer_cascades() {
        let (db, customer) = setup().await;

        let visit_id = db
            .visits()
            .create(
                NewVisit::for_customer(customer.id)
                    .operation(("Oil change", "100"))
                    .operation(("Filter", "30")),
            )
            .await
            .unwrap();
        assert_eq!(db.visits().list_operations(visit_id).await.unwrap().len(), 2);

        assert!(db
            .customers()
            .delete_by_public_id(&customer.public_id)
            .await
            .unwrap());

        assert!(db
            .visits()
            .list_for_customer(customer.id)
            .await
            .unwrap()
            .is_empty());
        assert!(db.visits().list_operations(visit_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_visits_scoped_to_customer() {
        let (db, ada) = setup().await;
        let bob = db
            .customers()
            .create(NewCustomer::new("Bob", "", ""))
            .await
            .unwrap();

        db.visits().create(NewVisit::for_customer(ada.id)).await.unwrap();
        db.visits().create(NewVisit::for_customer(bob.id)).await.unwrap();

        let visits = db.visits().list_for_customer(ada.id).await.unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].customer_id, ada.id);
    }
}

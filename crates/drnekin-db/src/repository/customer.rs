//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Public Id Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create("  Ada ", " 555 ", " 34ABC ")                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trim → ("Ada", "555", "34ABC"), now = UTC stamp                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  attempt 1..=5:                                                         │
//! │     public_id, secret = fresh random values                             │
//! │     INSERT ──► ok ──────────────► SELECT row ──► Customer               │
//! │        │                                                                │
//! │        └── UNIQUE(customers.public_id) ──► next attempt                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CollisionExhausted { attempts: 5 }                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With 48 random bits per id a collision is astronomically unlikely; the
//! retry exists so one never surfaces as an error. There is no backoff.
//!
//! ## Search
//! `list(query)` matches `query` as a case-sensitive substring of plate,
//! phone or name (`instr`, SQLite's default BINARY comparison).

use drnekin_core::ids::{IdGenerator, RandomIds};
use drnekin_core::validation::{normalize_public_id, normalize_query};
use drnekin_core::{clock, Customer, NewCustomer, CUSTOMER_LIST_LIMIT, PUBLIC_ID_ATTEMPTS};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

const PUBLIC_ID_COLUMN: &str = "customers.public_id";

const SELECT_CUSTOMER: &str = r#"
    SELECT
        id,
        public_id,
        secret,
        name,
        phone,
        plate,
        created_at,
        updated_at
    FROM customers
"#;

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.customers();
///
/// let customer = repo.create(NewCustomer::new("Ada", "555", "34ABC")).await?;
/// let hits = repo.list("34AB").await?;
/// let same = repo.get_by_public_id(&customer.public_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Registers a customer with fresh random identifiers.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The stored row, as read back
    /// * `Err(DbError::CollisionExhausted)` - No unique public id in 5 attempts
    pub async fn create(&self, input: NewCustomer) -> DbResult<Customer> {
        self.create_with_ids(input, &RandomIds).await
    }

    /// [`create`](Self::create) drawing identifiers from `ids`.
    pub async fn create_with_ids<G>(&self, input: NewCustomer, ids: &G) -> DbResult<Customer>
    where
        G: IdGenerator + ?Sized,
    {
        let input = input.normalized();
        let now = clock::utc_now();

        let mut conn = self.pool.acquire().await?;

        for attempt in 1..=PUBLIC_ID_ATTEMPTS {
            let public_id = ids.public_id();
            let secret = ids.secret();

            let inserted = sqlx::query(
                r#"
                INSERT INTO customers (
                    public_id, secret, name, phone, plate, created_at, updated_at
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?6
                )
                "#,
            )
            .bind(&public_id)
            .bind(&secret)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.plate)
            .bind(&now)
            .execute(&mut *conn)
            .await;

            match inserted.map_err(DbError::from) {
                Ok(_) => {
                    debug!(public_id = %public_id, attempt, "Customer created");

                    let customer = sqlx::query_as::<_, Customer>(&format!(
                        "{SELECT_CUSTOMER} WHERE public_id = ?1"
                    ))
                    .bind(&public_id)
                    .fetch_one(&mut *conn)
                    .await?;

                    return Ok(customer);
                }
                Err(err) if err.is_unique_violation_on(PUBLIC_ID_COLUMN) => {
                    warn!(attempt, "Public id collision, retrying");
                }
                Err(err) => return Err(err),
            }
        }

        Err(DbError::CollisionExhausted {
            attempts: PUBLIC_ID_ATTEMPTS,
        })
    }

    /// Lists customers, most recently updated first.
    ///
    /// ## Arguments
    /// * `query` - Substring of plate, phone or name; blank lists everyone
    ///
    /// At most 200 rows are returned either way.
    pub async fn list(&self, query: &str) -> DbResult<Vec<Customer>> {
        let customers = match normalize_query(query) {
            None => {
                debug!(limit = CUSTOMER_LIST_LIMIT, "Listing customers");

                sqlx::query_as::<_, Customer>(&format!(
                    "{SELECT_CUSTOMER} ORDER BY updated_at DESC, id DESC LIMIT ?1"
                ))
                .bind(CUSTOMER_LIST_LIMIT)
                .fetch_all(&self.pool)
                .await?
            }
            Some(query) => {
                debug!(query = %query, limit = CUSTOMER_LIST_LIMIT, "Searching customers");

                sqlx::query_as::<_, Customer>(&format!(
                    r#"{SELECT_CUSTOMER}
                    WHERE instr(plate, ?1) > 0
                       OR instr(phone, ?1) > 0
                       OR instr(name, ?1) > 0
                    ORDER BY updated_at DESC, id DESC
                    LIMIT ?2"#
                ))
                .bind(query)
                .bind(CUSTOMER_LIST_LIMIT)
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = customers.len(), "Customer list returned");
        Ok(customers)
    }

    /// Gets a customer by exact public id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Not found, or `public_id` is blank
    pub async fn get_by_public_id(&self, public_id: &str) -> DbResult<Option<Customer>> {
        let Some(public_id) = normalize_public_id(public_id) else {
            return Ok(None);
        };

        let customer = sqlx::query_as::<_, Customer>(&format!(
            "{SELECT_CUSTOMER} WHERE public_id = ?1"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Deletes a customer together with its visits and their operations.
    ///
    /// ## Returns
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - No such customer, or `public_id` is blank
    pub async fn delete_by_public_id(&self, public_id: &str) -> DbResult<bool> {
        let Some(public_id) = normalize_public_id(public_id) else {
            return Ok(false);
        };

        debug!(public_id = %public_id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE public_id = ?1")
            .bind(public_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets `updated_at` to now. Unknown ids are ignored.
    pub async fn touch_updated_at(&self, customer_id: i64) -> DbResult<()> {
        debug!(customer_id, "Touching customer");

        sqlx::query("UPDATE customers SET updated_at = ?1 WHERE id = ?2")
            .bind(clock::utc_now())
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Record Types
//!
//! The three records drnekin-qr stores and the inputs used to create them.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐ 1   * ┌─────────────────┐ 1   * ┌───────────────┐ │
//! │  │    Customer     │──────►│      Visit      │──────►│   Operation   │ │
//! │  │  ─────────────  │       │  ─────────────  │       │ ───────────── │ │
//! │  │  id (rowid)     │       │  id (rowid)     │       │ id (rowid)    │ │
//! │  │  public_id      │       │  customer_id    │       │ visit_id      │ │
//! │  │  secret         │       │  visit_date     │       │ text          │ │
//! │  │  name/phone/    │       │  km, notes      │       │ price         │ │
//! │  │  plate          │       │                 │       │               │ │
//! │  └─────────────────┘       └─────────────────┘       └───────────────┘ │
//! │                                                                         │
//! │  Deleting a parent removes its children (ON DELETE CASCADE).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! A customer has:
//! - `id`: storage-assigned integer, used for relations
//! - `public_id`: short random string, safe to put in a shared link
//!
//! Timestamps are kept as text (`YYYY-MM-DD HH:MM:SS`, UTC, no suffix) so
//! that databases written by earlier releases read back unchanged.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Customer
// =============================================================================

/// A customer of the workshop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Storage-assigned identifier.
    pub id: i64,

    /// Unique, shareable identifier (8 URL-safe characters).
    pub public_id: String,

    /// Capability token for this customer's public pages.
    pub secret: String,

    pub name: String,
    pub phone: String,

    /// Vehicle licence plate.
    pub plate: String,

    pub created_at: String,

    /// Moves forward whenever a visit is added.
    pub updated_at: String,
}

// =============================================================================
// Visit
// =============================================================================

/// One visit of a customer's vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Visit {
    pub id: i64,

    /// Owning customer (`customers.id`).
    pub customer_id: i64,

    /// Free-form date, `YYYY-MM-DD` when filled in automatically.
    pub visit_date: String,

    /// Odometer reading as typed by the user.
    pub km: String,

    pub notes: String,
    pub created_at: String,
}

// =============================================================================
// Operation
// =============================================================================

/// A line item of work performed during a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Operation {
    pub id: i64,

    /// Owning visit (`visits.id`).
    pub visit_id: i64,

    /// Never empty.
    pub text: String,

    /// Free-text price, may be empty.
    pub price: String,

    pub created_at: String,
}

// =============================================================================
// Inputs
// =============================================================================

/// Fields supplied when registering a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub plate: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, plate: impl Into<String>) -> Self {
        NewCustomer {
            name: name.into(),
            phone: phone.into(),
            plate: plate.into(),
        }
    }
}

/// A `(text, price)` pair entered together with a visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOperation {
    pub text: String,
    pub price: String,
}

impl NewOperation {
    pub fn new(text: impl Into<String>, price: impl Into<String>) -> Self {
        NewOperation {
            text: text.into(),
            price: price.into(),
        }
    }
}

impl<T: Into<String>, P: Into<String>> From<(T, P)> for NewOperation {
    fn from((text, price): (T, P)) -> Self {
        NewOperation::new(text, price)
    }
}

/// Fields supplied when recording a visit.
///
/// `operations` are stored in the same transaction as the visit row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVisit {
    pub customer_id: i64,

    /// Blank means "today".
    pub visit_date: String,

    pub km: String,
    pub notes: String,
    pub operations: Vec<NewOperation>,
}

impl NewVisit {
    /// Starts a visit for `customer_id` with every other field empty.
    pub fn for_customer(customer_id: i64) -> Self {
        NewVisit {
            customer_id,
            ..NewVisit::default()
        }
    }

    pub fn visit_date(mut self, visit_date: impl Into<String>) -> Self {
        self.visit_date = visit_date.into();
        self
    }

    pub fn km(mut self, km: impl Into<String>) -> Self {
        self.km = km.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Appends one operation line.
    pub fn operation(mut self, op: impl Into<NewOperation>) -> Self {
        self.operations.push(op.into());
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_visit_builder() {
        let visit = NewVisit::for_customer(7)
            .visit_date("2026-01-31")
            .km("120500")
            .operation(("Oil change", "100"))
            .operation(NewOperation::new("Brake pad", ""));

        assert_eq!(visit.customer_id, 7);
        assert_eq!(visit.visit_date, "2026-01-31");
        assert_eq!(visit.km, "120500");
        assert!(visit.notes.is_empty());
        assert_eq!(visit.operations.len(), 2);
        assert_eq!(visit.operations[1].text, "Brake pad");
    }

    #[test]
    fn test_customer_serializes_with_snake_case_keys() {
        let customer = Customer {
            id: 1,
            public_id: "abcdEFGH".to_string(),
            secret: "s".to_string(),
            name: "Ada".to_string(),
            phone: "555".to_string(),
            plate: "34ABC".to_string(),
            created_at: "2026-01-31 10:00:00".to_string(),
            updated_at: "2026-01-31 10:00:00".to_string(),
        };

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["public_id"], "abcdEFGH");
        assert_eq!(json["updated_at"], "2026-01-31 10:00:00");
    }
}

//! # Input Normalization
//!
//! Rules applied to user input right before it is written.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer   name, phone, plate      → trimmed                           │
//! │  Visit      visit_date              → trimmed, blank becomes today      │
//! │             km, notes               → trimmed                           │
//! │  Operation  text, price             → trimmed                           │
//! │             blank text              → dropped (not an error)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here rejects input. Storage constraints (foreign keys, unique
//! public ids) are enforced by the database layer.

use crate::clock;
use crate::types::{NewCustomer, NewOperation, NewVisit};

impl NewCustomer {
    /// Returns the input with every field trimmed.
    pub fn normalized(self) -> Self {
        NewCustomer {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            plate: self.plate.trim().to_string(),
        }
    }
}

impl NewOperation {
    /// Trims both fields; `None` when the text is blank.
    pub fn normalized(self) -> Option<Self> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }

        Some(NewOperation {
            text: text.to_string(),
            price: self.price.trim().to_string(),
        })
    }
}

impl NewVisit {
    /// Trims every field, fills a blank date with `today`, and drops
    /// operations whose text is blank.
    pub fn normalized_on(self, today: &str) -> Self {
        let visit_date = match self.visit_date.trim() {
            "" => today.to_string(),
            date => date.to_string(),
        };

        NewVisit {
            customer_id: self.customer_id,
            visit_date,
            km: self.km.trim().to_string(),
            notes: self.notes.trim().to_string(),
            operations: self
                .operations
                .into_iter()
                .filter_map(NewOperation::normalized)
                .collect(),
        }
    }

    /// [`NewVisit::normalized_on`] with the local calendar date.
    pub fn normalized(self) -> Self {
        let today = clock::today();
        self.normalized_on(&today)
    }
}

/// Trims a search query; `None` means "no filter".
pub fn normalize_query(query: &str) -> Option<&str> {
    match query.trim() {
        "" => None,
        q => Some(q),
    }
}

/// Trims a public id; `None` for blank input.
pub fn normalize_public_id(public_id: &str) -> Option<&str> {
    normalize_query(public_id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_fields_trimmed() {
        let input = NewCustomer::new("  Ada ", " 555 ", " 34ABC ").normalized();
        assert_eq!(input.name, "Ada");
        assert_eq!(input.phone, "555");
        assert_eq!(input.plate, "34ABC");
    }

    #[test]
    fn test_blank_operations_dropped() {
        let visit = NewVisit::for_customer(1)
            .operation(("Oil change", "100"))
            .operation(("  ", "50"))
            .operation(("Brake pad", ""))
            .normalized_on("2026-01-31");

        assert_eq!(
            visit.operations,
            vec![
                NewOperation::new("Oil change", "100"),
                NewOperation::new("Brake pad", ""),
            ]
        );
    }

    #[test]
    fn test_blank_visit_date_defaults_to_today() {
        let visit = NewVisit::for_customer(1)
            .visit_date("   ")
            .normalized_on("2026-01-31");
        assert_eq!(visit.visit_date, "2026-01-31");

        let visit = NewVisit::for_customer(1)
            .visit_date(" 2025-12-01 ")
            .normalized_on("2026-01-31");
        assert_eq!(visit.visit_date, "2025-12-01");
    }

    #[test]
    fn test_visit_text_fields_trimmed() {
        let visit = NewVisit::for_customer(1)
            .km(" 120500 ")
            .notes("\tleft rear tyre\n")
            .operation((" Rotate ", " 40 "))
            .normalized_on("2026-01-31");

        assert_eq!(visit.km, "120500");
        assert_eq!(visit.notes, "left rear tyre");
        assert_eq!(visit.operations[0], NewOperation::new("Rotate", "40"));
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query(" 34AB "), Some("34AB"));
        assert_eq!(normalize_public_id("\n"), None);
    }
}

//! # Repository Module
//!
//! Database repository implementations for drnekin-qr.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Caller                                                                │
//! │       │                                                                 │
//! │       │  db.customers().list("34AB")                                   │
//! │       ▼                                                                 │
//! │  CustomerRepository                     VisitRepository                │
//! │  ├── create(new_customer)               ├── create(new_visit)          │
//! │  ├── list(query)                        ├── list_for_customer(id)      │
//! │  ├── get_by_public_id(public_id)        └── list_operations(visit_id)  │
//! │  ├── delete_by_public_id(public_id)                                    │
//! │  └── touch_updated_at(id)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are mapped to records by the `FromRow` impls in `drnekin-core`.

pub mod customer;
pub mod visit;

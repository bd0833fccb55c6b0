//! # drnekin-core: Pure Record Types for drnekin-qr
//!
//! This crate holds the records the workshop keeps (customers, their visits,
//! and the operations done on each visit) as plain values, together with the
//! rules applied to input before it is stored. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        drnekin-qr Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (front end)                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               drnekin-db / drnekin-config                       │   │
//! │  │          SQLite repositories, settings file, paths              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ drnekin-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation │  │    ids    │  │   clock   │  │   │
//! │  │   │ Customer  │  │   trim,    │  │ public id │  │ UTC stamp │  │   │
//! │  │   │  Visit    │  │ blank ops  │  │  secret   │  │  today    │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (`Customer`, `Visit`, `Operation`) and inputs
//! - [`validation`] - Normalization applied before a write
//! - [`ids`] - Public id / secret / token generation
//! - [`clock`] - Timestamp formatting shared by every table
//! - `row` - `sqlx::FromRow` mapping (behind the `sqlx` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use drnekin_core::{NewCustomer, ids};
//!
//! let input = NewCustomer::new("  Ada ", " 555 ", " 34ABC ").normalized();
//! assert_eq!(input.plate, "34ABC");
//!
//! let public_id = ids::new_public_id();
//! assert_eq!(public_id.len(), ids::PUBLIC_ID_LEN);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod ids;
#[cfg(feature = "sqlx")]
mod row;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of customers returned by a list or search call.
pub const CUSTOMER_LIST_LIMIT: u32 = 200;

/// Number of attempts `create_customer` makes before giving up on a
/// unique public id.
pub const PUBLIC_ID_ATTEMPTS: u32 = 5;

//! # drnekin-db: Database Layer for drnekin-qr
//!
//! This crate provides database access for drnekin-qr.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        drnekin-qr Data Flow                             │
//! │                                                                         │
//! │  CLI command (customer list 34AB)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     drnekin-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐  ┌──────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │  │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                  │  │  (embedded)  │  │   │
//! │  │   │               │    │ CustomerRepo     │  │              │  │   │
//! │  │   │ SqlitePool    │◄───│ VisitRepo        │  │ 001_initial  │  │   │
//! │  │   └───────────────┘    └──────────────────┘  └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/drnekin-qr/app.db  (or $QR_DB_PATH)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Customer and visit repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drnekin_db::{Database, DbConfig};
//! use drnekin_core::{NewCustomer, NewVisit};
//!
//! let db = Database::new(DbConfig::resolve(Some(&app_config))).await?;
//!
//! let customer = db.customers().create(NewCustomer::new("Ada", "555", "34ABC")).await?;
//! db.visits()
//!     .create(NewVisit::for_customer(customer.id).operation(("Oil change", "100")))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::customer::CustomerRepository;
pub use repository::visit::VisitRepository;

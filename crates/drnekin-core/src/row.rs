//! # Row Mapping
//!
//! `sqlx::FromRow` for the record types. Text columns that are NULL read as
//! an empty string; ids are read as `i64`.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::types::{Customer, Operation, Visit};

fn text(row: &SqliteRow, column: &str) -> Result<String, sqlx::Error> {
    Ok(row.try_get::<Option<String>, _>(column)?.unwrap_or_default())
}

impl<'r> FromRow<'r, SqliteRow> for Customer {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Customer {
            id: row.try_get("id")?,
            public_id: text(row, "public_id")?,
            secret: text(row, "secret")?,
            name: text(row, "name")?,
            phone: text(row, "phone")?,
            plate: text(row, "plate")?,
            created_at: text(row, "created_at")?,
            updated_at: text(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Visit {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Visit {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            visit_date: text(row, "visit_date")?,
            km: text(row, "km")?,
            notes: text(row, "notes")?,
            created_at: text(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Operation {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Operation {
            id: row.try_get("id")?,
            visit_id: row.try_get("visit_id")?,
            text: text(row, "text")?,
            price: text(row, "price")?,
            created_at: text(row, "created_at")?,
        })
    }
}

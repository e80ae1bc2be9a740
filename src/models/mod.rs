//! Database entities and API request/response types, one file per entity family.

pub mod account;
pub mod branch;
pub mod catalog;
pub mod holder;
pub mod loan;
pub mod movement;
pub mod ownership;

use serde::Deserialize;

/// Offset/limit query parameters shared by all list endpoints.
///
/// # Example
///
/// `GET /api/v1/accounts?skip=20&limit=10`
#[derive(Debug, Deserialize)]
pub struct Pagination {
    /// Number of records to skip (defaults to 0)
    #[serde(default)]
    pub skip: i64,

    /// Maximum number of records to return (defaults to 100)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

//! Branch data models and API request types.

use serde::{Deserialize, Serialize};

/// Represents a branch record from the database.
///
/// Maps to the `branches` table. Every account and every movement references
/// the branch where it was opened or executed.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
    pub branch_type_id: i64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
}

/// Request body for creating a branch.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Downtown",
///   "city_id": 1,
///   "branch_type_id": 2,
///   "address": "100 Main St",
///   "phone": "555-0100",
///   "opening_hours": "Mon-Fri 9:00-17:00"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateBranchRequest {
    pub name: String,
    pub city_id: i64,
    pub branch_type_id: i64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
}

/// Request body for partially updating a branch.
///
/// Absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateBranchRequest {
    pub name: Option<String>,
    pub city_id: Option<i64>,
    pub branch_type_id: Option<i64>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
}

//! Catalog table models: cities, document types, account types, movement
//! types and branch types.
//!
//! Catalog rows are small administrator-maintained lookup records. They are
//! serialized to clients as-is, so the database structs double as response
//! bodies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A city referenced by branches and account holders.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

/// Request body for creating or replacing a city.
#[derive(Debug, Deserialize)]
pub struct CityRequest {
    pub name: String,
}

/// An identity-document type (national ID, passport, ...).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DocumentType {
    pub id: i64,
    pub name: String,
    pub abbreviation: Option<String>,
}

/// Request body for creating or replacing a document type.
#[derive(Debug, Deserialize)]
pub struct DocumentTypeRequest {
    pub name: String,
    pub abbreviation: Option<String>,
}

/// An account type, optionally carrying a default overdraft limit for
/// accounts opened under it.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AccountType {
    pub id: i64,
    pub name: String,
    pub overdraft_limit: Option<Decimal>,
}

/// Request body for creating or replacing an account type.
#[derive(Debug, Deserialize)]
pub struct AccountTypeRequest {
    pub name: String,
    pub overdraft_limit: Option<Decimal>,
}

/// A movement type.
///
/// The catalog is open, but the ledger engine hardcodes the first four
/// seeded codes: 1=Deposit, 2=Withdrawal, 3=Transfer Sent,
/// 4=Transfer Received.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MovementType {
    pub id: i64,
    pub name: String,
}

/// Request body for creating or replacing a movement type.
#[derive(Debug, Deserialize)]
pub struct MovementTypeRequest {
    pub name: String,
}

/// A branch type (main office, commercial branch, service point, ATM).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BranchType {
    pub id: i64,
    pub name: String,
}

/// Request body for creating or replacing a branch type.
#[derive(Debug, Deserialize)]
pub struct BranchTypeRequest {
    pub name: String,
}

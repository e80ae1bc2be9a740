//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing an account
//! - `CreateAccountRequest` / `UpdateAccountRequest`: Request bodies
//! - `BalanceResponse`: Response body for the balance endpoint

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. Balances are `NUMERIC(15,2)` columns,
/// mapped to `rust_decimal::Decimal` so no floating-point error ever
/// touches money.
///
/// # Mutation Rules
///
/// `balance` and `unauthorized_overdraft` are written only by the ledger
/// engine (`services::ledger`); every other field is updatable through the
/// generic account update endpoint.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Account {
    /// Unique identifier for this account
    pub id: i64,

    /// Unique account number, digits only, at most 20 characters
    pub number: String,

    /// Date the account was opened
    pub opening_date: NaiveDate,

    /// Foreign key into the `account_types` catalog
    pub account_type_id: i64,

    /// Branch where the account was opened
    pub branch_id: i64,

    /// Current balance. May be negative, down to `-overdraft_limit`.
    pub balance: Decimal,

    /// Additional amount withdrawable beyond a zero balance.
    ///
    /// Nullable in the schema; the ledger engine treats NULL as 0.
    pub overdraft_limit: Option<Decimal>,

    /// Marker for accounts with large movement volume
    pub large_movement: bool,

    /// Set by the ledger engine whenever a withdrawal or transfer leaves
    /// the balance negative. Never cleared by the engine.
    pub unauthorized_overdraft: bool,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "number": "1001234567890",
///   "opening_date": "2024-01-15",
///   "account_type_id": 1,
///   "branch_id": 1,
///   "balance": "0.00",
///   "overdraft_limit": "500.00"
/// }
/// ```
///
/// # Validation
///
/// - `number`: Required, digits only, 1-20 characters, unique
/// - `balance`: Optional initial balance, defaults to 0, must be >= 0
/// - `overdraft_limit`: Optional, must be >= 0 when present
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub number: String,
    pub opening_date: NaiveDate,
    pub account_type_id: i64,
    pub branch_id: i64,

    /// Initial balance (defaults to 0 if not provided)
    #[serde(default)]
    pub balance: Decimal,

    pub overdraft_limit: Option<Decimal>,
}

/// Request body for partially updating an account.
///
/// `balance` and `unauthorized_overdraft` are deliberately absent: the
/// ledger engine owns them.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub number: Option<String>,
    pub account_type_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub overdraft_limit: Option<Decimal>,
    pub large_movement: Option<bool>,
}

/// Response body for the balance lookup endpoint.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "number": "1001234567890",
///   "balance": "1500.00",
///   "overdraft_limit": "500.00",
///   "available_balance": "2000.00"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub id: i64,
    pub number: String,
    pub balance: Decimal,
    pub overdraft_limit: Option<Decimal>,

    /// `balance + overdraft_limit`, the most a single withdrawal may take
    pub available_balance: Decimal,
}

impl From<Account> for BalanceResponse {
    fn from(account: Account) -> Self {
        let available_balance = account.balance + account.overdraft_limit.unwrap_or_default();
        Self {
            id: account.id,
            number: account.number,
            balance: account.balance,
            overdraft_limit: account.overdraft_limit,
            available_balance,
        }
    }
}

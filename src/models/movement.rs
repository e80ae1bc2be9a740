//! Movement data models and API request/response types.
//!
//! A movement is an immutable ledger entry recording a single signed balance
//! change. Movements are created exclusively by the ledger engine
//! (`services::ledger`); the only field a client may change afterwards is
//! the description.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Movement-type codes written by the ledger engine.
///
/// These match the first four rows seeded into the `movement_types` catalog.
/// The catalog itself is open (administrators may add more types), but the
/// engine only ever writes these.
pub const TYPE_DEPOSIT: i64 = 1;
pub const TYPE_WITHDRAWAL: i64 = 2;
pub const TYPE_TRANSFER_SENT: i64 = 3;
pub const TYPE_TRANSFER_RECEIVED: i64 = 4;

/// Represents a movement record from the database.
///
/// # Sign Convention
///
/// Deposits and received transfers carry a positive `value`; withdrawals
/// and sent transfers carry a negative one. The absolute value is always
/// the operation amount.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Movement {
    /// Unique identifier for this movement
    pub id: i64,

    /// Account whose balance this entry changed
    pub account_id: i64,

    /// Branch where the operation was executed
    pub branch_id: i64,

    /// Date the movement was booked (UTC date at execution time)
    pub date: NaiveDate,

    /// Signed amount, scale 2
    pub value: Decimal,

    /// Foreign key into the `movement_types` catalog
    pub movement_type_id: i64,

    /// Free-text description, at most 200 characters
    pub description: Option<String>,
}

/// Request body for a deposit.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": 1,
///   "branch_id": 1,
///   "amount": "250.00",
///   "description": "Payroll"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub account_id: i64,
    pub branch_id: i64,

    /// Amount to deposit, must be positive
    pub amount: Decimal,

    pub description: Option<String>,
}

/// Request body for a withdrawal.
///
/// # Validation
///
/// The amount must not exceed the account's available balance
/// (balance + overdraft limit).
#[derive(Debug, Deserialize)]
pub struct WithdrawalRequest {
    pub account_id: i64,
    pub branch_id: i64,

    /// Amount to withdraw, must be positive
    pub amount: Decimal,

    pub description: Option<String>,
}

/// Request body for a transfer between two accounts.
///
/// # Atomicity Guarantee
///
/// Both balance updates and both movement records are committed in one
/// database transaction. Either everything applies or nothing does.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Account the money leaves (will decrease)
    pub source_account_id: i64,

    /// Account the money enters (will increase)
    pub dest_account_id: i64,

    pub branch_id: i64,

    /// Amount to transfer, must be positive
    pub amount: Decimal,

    pub description: Option<String>,
}

/// Request body for updating a movement's description.
///
/// No other movement field is updatable; ledger entries are append-only.
#[derive(Debug, Deserialize)]
pub struct UpdateMovementRequest {
    pub description: Option<String>,
}

/// Response returned by the transfer endpoint: both sides of the transfer.
///
/// # JSON Example
///
/// ```json
/// {
///   "sent": { "id": 10, "value": "-100.00", "movement_type_id": 3, ... },
///   "received": { "id": 11, "value": "100.00", "movement_type_id": 4, ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub sent: Movement,
    pub received: Movement,
}

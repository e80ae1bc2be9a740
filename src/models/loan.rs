//! Loan data models and API request/response types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a loan record from the database.
///
/// Maps to the `loans` table. The installment is either supplied by the
/// caller at creation or computed by the amortization calculator
/// (`services::amortization`), and recomputed whenever rate, term or
/// insurance change without an explicit new installment.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Loan {
    /// Unique identifier for this loan
    pub id: i64,

    /// Account the loan is attached to
    pub account_id: i64,

    /// Unique alphanumeric loan number, at most 20 characters
    pub number: String,

    /// Origination date
    pub date: NaiveDate,

    /// Amount lent, scale 2
    pub principal: Decimal,

    /// Annual interest rate as a percentage, 0 to 100
    pub interest_rate: Decimal,

    /// Term in months, 1 to 360
    pub term_months: i32,

    /// Optional monthly insurance premium added on top of the capital
    /// installment
    pub insurance: Option<Decimal>,

    /// Level monthly payment
    pub installment: Decimal,
}

/// Request body for creating a loan.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": 1,
///   "number": "L20240001",
///   "date": "2024-01-15",
///   "principal": "10000000.00",
///   "interest_rate": "12.50",
///   "term_months": 36,
///   "insurance": "50000.00"
/// }
/// ```
///
/// # Validation
///
/// - `number`: alphanumeric, 1-20 characters, unique
/// - `principal` > 0, `interest_rate` in [0, 100], `term_months` in [1, 360]
/// - `installment`: optional; computed from the other terms when absent
#[derive(Debug, Deserialize)]
pub struct CreateLoanRequest {
    pub account_id: i64,
    pub number: String,
    pub date: NaiveDate,
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub term_months: i32,
    pub insurance: Option<Decimal>,
    pub installment: Option<Decimal>,
}

/// Request body for partially updating a loan.
///
/// When rate, term or insurance change and no explicit `installment` is
/// supplied in the same request, the installment is recomputed from the
/// merged terms.
#[derive(Debug, Deserialize)]
pub struct UpdateLoanRequest {
    pub interest_rate: Option<Decimal>,
    pub term_months: Option<i32>,
    pub insurance: Option<Decimal>,
    pub installment: Option<Decimal>,
}

/// Request body for the standalone installment quote endpoint.
///
/// Exercises the amortization calculator without touching storage.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub principal: Decimal,
    pub interest_rate: Decimal,
    pub term_months: i32,
    pub insurance: Option<Decimal>,
}

/// Response body for the installment quote endpoint.
///
/// # JSON Example
///
/// ```json
/// {
///   "installment": "384536.26",
///   "total_repayment": "13843305.21",
///   "total_interest": "3843305.21"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub installment: Decimal,
    pub total_repayment: Decimal,
    pub total_interest: Decimal,
}

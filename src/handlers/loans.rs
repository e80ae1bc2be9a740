//! Loan HTTP handlers.
//!
//! Creation and update delegate to the loan service, which fills or
//! recomputes the installment through the amortization calculator. The
//! quote endpoint exposes the calculator directly without touching storage.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        Pagination,
        loan::{CreateLoanRequest, Loan, QuoteRequest, QuoteResponse, UpdateLoanRequest},
    },
    services::{amortization, loans},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

/// Loan numbers are alphanumeric, 1 to 20 characters.
fn validate_loan_number(number: &str) -> Result<(), AppError> {
    if number.is_empty() || number.len() > 20 || !number.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(AppError::InvalidRequest(
            "Loan number must be 1-20 alphanumeric characters".to_string(),
        ));
    }
    Ok(())
}

/// Shared range checks for loan terms. `None` fields are skipped, so the
/// same function validates both full creates and partial updates.
fn validate_terms(
    principal: Option<Decimal>,
    interest_rate: Option<Decimal>,
    term_months: Option<i32>,
    insurance: Option<Decimal>,
    installment: Option<Decimal>,
) -> Result<(), AppError> {
    if principal.is_some_and(|p| p <= Decimal::ZERO) {
        return Err(AppError::InvalidRequest(
            "Principal must be positive".to_string(),
        ));
    }
    if interest_rate.is_some_and(|r| r < Decimal::ZERO || r > Decimal::ONE_HUNDRED) {
        return Err(AppError::InvalidRequest(
            "Interest rate must be between 0 and 100".to_string(),
        ));
    }
    if term_months.is_some_and(|t| !(1..=360).contains(&t)) {
        return Err(AppError::InvalidRequest(
            "Term must be between 1 and 360 months".to_string(),
        ));
    }
    if insurance.is_some_and(|i| i < Decimal::ZERO) {
        return Err(AppError::InvalidRequest(
            "Insurance must not be negative".to_string(),
        ));
    }
    if installment.is_some_and(|i| i <= Decimal::ZERO) {
        return Err(AppError::InvalidRequest(
            "Installment must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Compute an installment quote without creating anything.
///
/// # Request Body
///
/// ```json
/// {
///   "principal": "10000000.00",
///   "interest_rate": "12.50",
///   "term_months": 36,
///   "insurance": "50000.00"
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "installment": "384536.26",
///   "total_repayment": "13843305.21",
///   "total_interest": "3843305.21"
/// }
/// ```
pub async fn quote_installment(
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    validate_terms(
        Some(request.principal),
        Some(request.interest_rate),
        Some(request.term_months),
        request.insurance,
        None,
    )?;

    let quote = amortization::installment_quote(
        request.principal,
        request.interest_rate,
        request.term_months,
        request.insurance.unwrap_or_default(),
    );

    Ok(Json(QuoteResponse {
        installment: quote.installment,
        total_repayment: quote.total_repayment,
        total_interest: quote.total_interest,
    }))
}

/// Create a loan. The installment is computed from the terms when omitted.
///
/// # Response
///
/// - **Success (201 Created)**: the created loan
/// - **Error (404)**: the referenced account doesn't exist
/// - **Error (422)**: duplicate loan number
pub async fn create_loan(
    State(pool): State<DbPool>,
    Json(request): Json<CreateLoanRequest>,
) -> Result<(StatusCode, Json<Loan>), AppError> {
    validate_loan_number(&request.number)?;
    validate_terms(
        Some(request.principal),
        Some(request.interest_rate),
        Some(request.term_months),
        request.insurance,
        request.installment,
    )?;

    let loan = loans::create_loan(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// List loans with offset/limit.
pub async fn list_loans(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Loan>>, AppError> {
    let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans ORDER BY id OFFSET $1 LIMIT $2")
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&pool)
        .await?;

    Ok(Json(loans))
}

/// Get a loan by id.
pub async fn get_loan(
    State(pool): State<DbPool>,
    Path(loan_id): Path<i64>,
) -> Result<Json<Loan>, AppError> {
    let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
        .bind(loan_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("loan {loan_id}")))?;

    Ok(Json(loan))
}

/// Get a loan by its unique number.
pub async fn get_loan_by_number(
    State(pool): State<DbPool>,
    Path(number): Path<String>,
) -> Result<Json<Loan>, AppError> {
    let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE number = $1")
        .bind(&number)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("loan number {number}")))?;

    Ok(Json(loan))
}

/// List the loans attached to one account.
pub async fn list_loans_by_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Loan>>, AppError> {
    let loans =
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE account_id = $1 ORDER BY id")
            .bind(account_id)
            .fetch_all(&pool)
            .await?;

    Ok(Json(loans))
}

/// Partially update a loan's terms.
///
/// When rate, term or insurance change without an explicit installment,
/// the installment is recomputed from the merged terms.
pub async fn update_loan(
    State(pool): State<DbPool>,
    Path(loan_id): Path<i64>,
    Json(request): Json<UpdateLoanRequest>,
) -> Result<Json<Loan>, AppError> {
    validate_terms(
        None,
        request.interest_rate,
        request.term_months,
        request.insurance,
        request.installment,
    )?;

    let loan = loans::update_loan(&pool, loan_id, request).await?;

    Ok(Json(loan))
}

/// Delete a loan.
pub async fn delete_loan(
    State(pool): State<DbPool>,
    Path(loan_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM loans WHERE id = $1")
        .bind(loan_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("loan {loan_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

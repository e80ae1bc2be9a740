//! Loan service - creation and update logic around the amortization
//! calculator.
//!
//! The installment field is the only derived value in the loan record: when
//! the caller omits it at creation, or changes rate/term/insurance without
//! supplying a new one, it is recomputed from the (merged) terms.

use crate::{
    db::DbPool,
    error::AppError,
    models::loan::{CreateLoanRequest, Loan, UpdateLoanRequest},
    services::amortization,
};

/// Create a loan, filling in the installment when the caller omitted it.
///
/// # Errors
///
/// - `NotFound`: The referenced account doesn't exist
/// - `InvalidOperation`: The loan number is already taken
pub async fn create_loan(pool: &DbPool, request: CreateLoanRequest) -> Result<Loan, AppError> {
    // The loan must hang off an existing account
    let account_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
        .bind(request.account_id)
        .fetch_one(pool)
        .await?;

    if !account_exists {
        return Err(AppError::NotFound(format!(
            "account {}",
            request.account_id
        )));
    }

    // Loan numbers are unique
    let number_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE number = $1)")
            .bind(&request.number)
            .fetch_one(pool)
            .await?;

    if number_taken {
        return Err(AppError::InvalidOperation(format!(
            "Loan number {} already exists",
            request.number
        )));
    }

    // Compute the installment when the caller didn't supply one
    let installment = match request.installment {
        Some(value) => value,
        None => {
            amortization::installment_quote(
                request.principal,
                request.interest_rate,
                request.term_months,
                request.insurance.unwrap_or_default(),
            )
            .installment
        }
    };

    let loan = sqlx::query_as::<_, Loan>(
        r#"
        INSERT INTO loans (account_id, number, date, principal, interest_rate, term_months, insurance, installment)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(request.account_id)
    .bind(&request.number)
    .bind(request.date)
    .bind(request.principal)
    .bind(request.interest_rate)
    .bind(request.term_months)
    .bind(request.insurance.unwrap_or_default())
    .bind(installment)
    .fetch_one(pool)
    .await?;

    Ok(loan)
}

/// Partially update a loan.
///
/// When rate, term or insurance change and the request carries no explicit
/// installment, the installment is recomputed from the merged terms. An
/// explicit installment always wins.
///
/// # Errors
///
/// - `NotFound`: The loan doesn't exist
pub async fn update_loan(
    pool: &DbPool,
    loan_id: i64,
    request: UpdateLoanRequest,
) -> Result<Loan, AppError> {
    let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
        .bind(loan_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("loan {loan_id}")))?;

    let terms_changed = request.interest_rate.is_some()
        || request.term_months.is_some()
        || request.insurance.is_some();

    // Merge the incoming terms over the stored ones
    let interest_rate = request.interest_rate.unwrap_or(loan.interest_rate);
    let term_months = request.term_months.unwrap_or(loan.term_months);
    let insurance = request.insurance.or(loan.insurance);

    let installment = match request.installment {
        Some(value) => value,
        None if terms_changed => {
            amortization::installment_quote(
                loan.principal,
                interest_rate,
                term_months,
                insurance.unwrap_or_default(),
            )
            .installment
        }
        None => loan.installment,
    };

    let updated = sqlx::query_as::<_, Loan>(
        r#"
        UPDATE loans
        SET interest_rate = $1, term_months = $2, insurance = $3, installment = $4
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(interest_rate)
    .bind(term_months)
    .bind(insurance)
    .bind(installment)
    .bind(loan_id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

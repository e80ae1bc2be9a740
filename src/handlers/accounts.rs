//! Account management HTTP handlers.
//!
//! Accounts are created and updated here; their balance and the
//! unauthorized-overdraft flag are written only by the ledger engine
//! (`services::ledger`), which is why the update endpoint doesn't accept
//! either field.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        Pagination,
        account::{Account, BalanceResponse, CreateAccountRequest, UpdateAccountRequest},
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

/// Account numbers are digits only, 1 to 20 characters.
fn validate_account_number(number: &str) -> Result<(), AppError> {
    if number.is_empty() || number.len() > 20 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidRequest(
            "Account number must be 1-20 digits".to_string(),
        ));
    }
    Ok(())
}

/// Create a new account.
///
/// # Request Body
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
/// # Response
///
/// - **Success (201 Created)**: the created account
/// - **Error (400)**: malformed number, negative balance or overdraft
/// - **Error (422)**: duplicate account number
pub async fn create_account(
    State(pool): State<DbPool>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    validate_account_number(&request.number)?;

    if request.balance < Decimal::ZERO {
        return Err(AppError::InvalidRequest(
            "Initial balance must not be negative".to_string(),
        ));
    }
    if request.overdraft_limit.is_some_and(|limit| limit < Decimal::ZERO) {
        return Err(AppError::InvalidRequest(
            "Overdraft limit must not be negative".to_string(),
        ));
    }

    // Account numbers are unique
    let number_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE number = $1)")
            .bind(&request.number)
            .fetch_one(&pool)
            .await?;

    if number_taken {
        return Err(AppError::InvalidOperation(format!(
            "Account number {} already exists",
            request.number
        )));
    }

    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (number, opening_date, account_type_id, branch_id, balance, overdraft_limit)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(request.number)
    .bind(request.opening_date)
    .bind(request.account_type_id)
    .bind(request.branch_id)
    .bind(request.balance)
    .bind(request.overdraft_limit.unwrap_or_default())
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// List accounts with offset/limit.
pub async fn list_accounts(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts =
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY id OFFSET $1 LIMIT $2")
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&pool)
            .await?;

    Ok(Json(accounts))
}

/// Get an account by id.
pub async fn get_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
) -> Result<Json<Account>, AppError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

    Ok(Json(account))
}

/// Get an account by its unique number.
pub async fn get_account_by_number(
    State(pool): State<DbPool>,
    Path(number): Path<String>,
) -> Result<Json<Account>, AppError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE number = $1")
        .bind(&number)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account number {number}")))?;

    Ok(Json(account))
}

/// Get an account's balance together with its available balance
/// (balance + overdraft limit).
pub async fn get_account_balance(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
) -> Result<Json<BalanceResponse>, AppError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

    Ok(Json(account.into()))
}

/// List the accounts opened at one branch.
pub async fn list_accounts_by_branch(
    State(pool): State<DbPool>,
    Path(branch_id): Path<i64>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts =
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE branch_id = $1 ORDER BY id")
            .bind(branch_id)
            .fetch_all(&pool)
            .await?;

    Ok(Json(accounts))
}

/// Partially update an account.
///
/// Balance and the unauthorized-overdraft flag cannot be set here; only
/// the ledger engine writes them.
pub async fn update_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<Json<Account>, AppError> {
    if let Some(ref number) = request.number {
        validate_account_number(number)?;

        // Reject a number already used by a different account
        let number_taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE number = $1 AND id <> $2)",
        )
        .bind(number)
        .bind(account_id)
        .fetch_one(&pool)
        .await?;

        if number_taken {
            return Err(AppError::InvalidOperation(format!(
                "Account number {number} already exists"
            )));
        }
    }
    if request.overdraft_limit.is_some_and(|limit| limit < Decimal::ZERO) {
        return Err(AppError::InvalidRequest(
            "Overdraft limit must not be negative".to_string(),
        ));
    }

    let account = sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET number = COALESCE($1, number),
            account_type_id = COALESCE($2, account_type_id),
            branch_id = COALESCE($3, branch_id),
            overdraft_limit = COALESCE($4, overdraft_limit),
            large_movement = COALESCE($5, large_movement)
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(request.number)
    .bind(request.account_type_id)
    .bind(request.branch_id)
    .bind(request.overdraft_limit)
    .bind(request.large_movement)
    .bind(account_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

    Ok(Json(account))
}

/// Delete an account. Movements, loans and ownership rows cascade at the
/// storage level.
pub async fn delete_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(account_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("account {account_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

//! Movement HTTP handlers.
//!
//! The three write endpoints (deposit, withdrawal, transfer) delegate to the
//! ledger engine; everything else is read-only except the description
//! update. Ledger entries are append-only: value, account and type are never
//! updatable.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        Pagination,
        movement::{
            DepositRequest, Movement, TransferRequest, TransferResponse, UpdateMovementRequest,
            WithdrawalRequest,
        },
    },
    services::ledger,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;

/// Descriptions are capped at 200 characters, matching the column width.
fn validate_description(description: &Option<String>) -> Result<(), AppError> {
    if description.as_ref().is_some_and(|d| d.len() > 200) {
        return Err(AppError::InvalidRequest(
            "Description must be at most 200 characters".to_string(),
        ));
    }
    Ok(())
}

/// Deposit money into an account.
///
/// # Request Body
///
/// ```json
/// {
///   "account_id": 1,
///   "branch_id": 1,
///   "amount": "250.00",
///   "description": "Payroll"
/// }
/// ```
///
/// # Response (201)
///
/// The created movement (type 1, positive value).
pub async fn create_deposit(
    State(pool): State<DbPool>,
    Json(request): Json<DepositRequest>,
) -> Result<(StatusCode, Json<Movement>), AppError> {
    validate_description(&request.description)?;

    let movement = ledger::deposit(
        &pool,
        request.account_id,
        request.amount,
        request.branch_id,
        request.description,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

/// Withdraw money from an account.
///
/// # Response (201)
///
/// The created movement (type 2, negative value).
///
/// # Errors
///
/// - **404**: account doesn't exist
/// - **422**: amount exceeds the available balance
pub async fn create_withdrawal(
    State(pool): State<DbPool>,
    Json(request): Json<WithdrawalRequest>,
) -> Result<(StatusCode, Json<Movement>), AppError> {
    validate_description(&request.description)?;

    let movement = ledger::withdraw(
        &pool,
        request.account_id,
        request.amount,
        request.branch_id,
        request.description,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

/// Transfer money between two accounts.
///
/// # Response (201)
///
/// Both sides of the transfer: `{ "sent": ..., "received": ... }`.
///
/// # Errors
///
/// - **400**: source and destination are the same account
/// - **404**: either account doesn't exist
/// - **422**: amount exceeds the source's available balance
pub async fn create_transfer(
    State(pool): State<DbPool>,
    Json(request): Json<TransferRequest>,
) -> Result<(StatusCode, Json<TransferResponse>), AppError> {
    validate_description(&request.description)?;

    // The engine tolerates equal ids, but a self-transfer is a client error
    if request.source_account_id == request.dest_account_id {
        return Err(AppError::InvalidRequest(
            "Source and destination accounts must differ".to_string(),
        ));
    }

    let (sent, received) = ledger::transfer(
        &pool,
        request.source_account_id,
        request.dest_account_id,
        request.amount,
        request.branch_id,
        request.description,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(TransferResponse { sent, received })))
}

/// List movements with offset/limit, newest first.
pub async fn list_movements(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Movement>>, AppError> {
    let movements = sqlx::query_as::<_, Movement>(
        "SELECT * FROM movements ORDER BY date DESC, id DESC OFFSET $1 LIMIT $2",
    )
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(movements))
}

/// Get a movement by id.
pub async fn get_movement(
    State(pool): State<DbPool>,
    Path(movement_id): Path<i64>,
) -> Result<Json<Movement>, AppError> {
    let movement = sqlx::query_as::<_, Movement>("SELECT * FROM movements WHERE id = $1")
        .bind(movement_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("movement {movement_id}")))?;

    Ok(Json(movement))
}

/// List the movements of one account, newest first.
pub async fn list_movements_by_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Movement>>, AppError> {
    let movements = sqlx::query_as::<_, Movement>(
        r#"
        SELECT * FROM movements
        WHERE account_id = $1
        ORDER BY date DESC, id DESC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(account_id)
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(movements))
}

/// List the movements booked within an inclusive date range, newest first.
///
/// `GET /api/v1/movements/range/{start}/{end}` with ISO dates.
pub async fn list_movements_by_range(
    State(pool): State<DbPool>,
    Path((start, end)): Path<(NaiveDate, NaiveDate)>,
) -> Result<Json<Vec<Movement>>, AppError> {
    let movements = sqlx::query_as::<_, Movement>(
        r#"
        SELECT * FROM movements
        WHERE date >= $1 AND date <= $2
        ORDER BY date DESC, id DESC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(&pool)
    .await?;

    Ok(Json(movements))
}

/// Update a movement's description. The only mutable field of a ledger
/// entry.
pub async fn update_movement(
    State(pool): State<DbPool>,
    Path(movement_id): Path<i64>,
    Json(request): Json<UpdateMovementRequest>,
) -> Result<Json<Movement>, AppError> {
    validate_description(&request.description)?;

    let movement = sqlx::query_as::<_, Movement>(
        "UPDATE movements SET description = COALESCE($1, description) WHERE id = $2 RETURNING *",
    )
    .bind(request.description)
    .bind(movement_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("movement {movement_id}")))?;

    Ok(Json(movement))
}

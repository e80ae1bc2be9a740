//! Ledger engine - Core business logic for balance-affecting operations.
//!
//! This service handles:
//! - Deposits, withdrawals and transfers
//! - Available-balance validation (balance + overdraft limit)
//! - Unauthorized-overdraft flagging
//! - Movement record creation
//!
//! # Atomicity Guarantees
//!
//! Every operation runs inside one PostgreSQL transaction: the balance
//! update(s) and the movement insert(s) commit together or not at all.
//! Account rows are locked with `SELECT ... FOR UPDATE` for the duration of
//! the read-modify-write, so concurrent operations on the same account
//! serialize at the row level.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    db::DbPool,
    error::AppError,
    models::movement::{
        Movement, TYPE_DEPOSIT, TYPE_TRANSFER_RECEIVED, TYPE_TRANSFER_SENT, TYPE_WITHDRAWAL,
    },
};

/// Execute a deposit (add money to an account).
///
/// # Process
///
/// 1. Validate the amount
/// 2. Start database transaction
/// 3. Update the account balance (the UPDATE takes the row lock)
/// 4. Record the movement (type 1, positive value)
/// 5. Commit (or rollback on error)
///
/// # Errors
///
/// - `NotFound`: Account doesn't exist
/// - `InvalidRequest`: Amount is zero or negative
/// - `Database`: Database error occurred
pub async fn deposit(
    pool: &DbPool,
    account_id: i64,
    amount: Decimal,
    branch_id: i64,
    description: Option<String>,
) -> Result<Movement, AppError> {
    // Validate amount
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidRequest(
            "Amount must be positive".to_string(),
        ));
    }

    // Start db transaction
    let mut tx = pool.begin().await?;

    // Update balance; zero rows affected means the account doesn't exist
    let updated_count = sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE id = $2")
        .bind(amount)
        .bind(account_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if updated_count == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound(format!("account {account_id}")));
    }

    // Record the movement
    let movement = sqlx::query_as::<_, Movement>(
        r#"
        INSERT INTO movements (account_id, branch_id, date, value, movement_type_id, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(branch_id)
    .bind(Utc::now().date_naive())
    .bind(amount)
    .bind(TYPE_DEPOSIT)
    .bind(description.unwrap_or_else(|| "Deposit".to_string()))
    .fetch_one(&mut *tx)
    .await?;

    // Commit all changes atomically
    tx.commit().await?;

    Ok(movement)
}

/// Execute a withdrawal (remove money from an account).
///
/// The account may go negative down to its overdraft limit:
/// `available = balance + COALESCE(overdraft_limit, 0)`. Whenever the
/// resulting balance is negative the unauthorized-overdraft flag is set,
/// even when the overdraft stayed within the authorized limit. The engine
/// never clears the flag.
///
/// # Errors
///
/// - `NotFound`: Account doesn't exist
/// - `InsufficientFunds`: Amount exceeds the available balance
/// - `InvalidRequest`: Amount is zero or negative
pub async fn withdraw(
    pool: &DbPool,
    account_id: i64,
    amount: Decimal,
    branch_id: i64,
    description: Option<String>,
) -> Result<Movement, AppError> {
    // Validate amount
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidRequest(
            "Amount must be positive".to_string(),
        ));
    }

    // Start database transaction
    let mut tx = pool.begin().await?;

    // Lock the account and read balance + overdraft limit
    // FOR UPDATE prevents other transactions from modifying the row
    let (balance, overdraft): (Decimal, Decimal) = sqlx::query_as(
        "SELECT balance, COALESCE(overdraft_limit, 0) FROM accounts WHERE id = $1 FOR UPDATE",
    )
    .bind(account_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("account {account_id}")))?;

    // Validate against the available balance
    let available = balance + overdraft;
    if amount > available {
        tx.rollback().await?;
        return Err(AppError::InsufficientFunds {
            available,
            requested: amount,
        });
    }

    // Update balance
    sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE id = $2")
        .bind(amount)
        .bind(account_id)
        .execute(&mut *tx)
        .await?;

    // Flag the account whenever the balance went negative
    sqlx::query("UPDATE accounts SET unauthorized_overdraft = TRUE WHERE id = $1 AND balance < 0")
        .bind(account_id)
        .execute(&mut *tx)
        .await?;

    // Record the movement (negative value for withdrawals)
    let movement = sqlx::query_as::<_, Movement>(
        r#"
        INSERT INTO movements (account_id, branch_id, date, value, movement_type_id, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(branch_id)
    .bind(Utc::now().date_naive())
    .bind(-amount)
    .bind(TYPE_WITHDRAWAL)
    .bind(description.unwrap_or_else(|| "Withdrawal".to_string()))
    .fetch_one(&mut *tx)
    .await?;

    // Commit atomically
    tx.commit().await?;

    Ok(movement)
}

/// Execute a transfer (move money between two accounts).
///
/// Locks the source row, then the destination row, checks the source's
/// available balance, applies both balance updates and writes the two
/// movement records (type 3 on the source, type 4 on the destination) in
/// one transaction. No state where only one side has applied is ever
/// visible.
///
/// The balance updates are relative (`balance = balance - $1`), so equal
/// source and destination ids net to zero with two movements recorded.
/// Handlers reject that case before it reaches the engine.
///
/// # Errors
///
/// - `NotFound`: Either account doesn't exist (message names which side)
/// - `InsufficientFunds`: Amount exceeds the source's available balance
/// - `InvalidRequest`: Amount is zero or negative
pub async fn transfer(
    pool: &DbPool,
    source_account_id: i64,
    dest_account_id: i64,
    amount: Decimal,
    branch_id: i64,
    description: Option<String>,
) -> Result<(Movement, Movement), AppError> {
    // Validate amount
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidRequest(
            "Amount must be positive".to_string(),
        ));
    }

    // Start database transaction
    let mut tx = pool.begin().await?;

    // Lock source account and read its number, balance and overdraft limit
    let (source_number, balance, overdraft): (String, Decimal, Decimal) = sqlx::query_as(
        r#"
        SELECT number, balance, COALESCE(overdraft_limit, 0)
        FROM accounts
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(source_account_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("source account {source_account_id}")))?;

    // Lock destination account
    let dest_number: String =
        sqlx::query_scalar("SELECT number FROM accounts WHERE id = $1 FOR UPDATE")
            .bind(dest_account_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("destination account {dest_account_id}")))?;

    // Available-balance check on the source only
    let available = balance + overdraft;
    if amount > available {
        tx.rollback().await?;
        return Err(AppError::InsufficientFunds {
            available,
            requested: amount,
        });
    }

    // Update both balances atomically
    sqlx::query("UPDATE accounts SET balance = balance - $1 WHERE id = $2")
        .bind(amount)
        .bind(source_account_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE id = $2")
        .bind(amount)
        .bind(dest_account_id)
        .execute(&mut *tx)
        .await?;

    // Flag the source whenever its balance went negative
    sqlx::query("UPDATE accounts SET unauthorized_overdraft = TRUE WHERE id = $1 AND balance < 0")
        .bind(source_account_id)
        .execute(&mut *tx)
        .await?;

    let date = Utc::now().date_naive();

    // Record the outgoing movement on the source
    let sent = sqlx::query_as::<_, Movement>(
        r#"
        INSERT INTO movements (account_id, branch_id, date, value, movement_type_id, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(source_account_id)
    .bind(branch_id)
    .bind(date)
    .bind(-amount)
    .bind(TYPE_TRANSFER_SENT)
    .bind(
        description
            .clone()
            .unwrap_or_else(|| format!("Transfer to account {dest_number}")),
    )
    .fetch_one(&mut *tx)
    .await?;

    // Record the incoming movement on the destination
    let received = sqlx::query_as::<_, Movement>(
        r#"
        INSERT INTO movements (account_id, branch_id, date, value, movement_type_id, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(dest_account_id)
    .bind(branch_id)
    .bind(date)
    .bind(amount)
    .bind(TYPE_TRANSFER_RECEIVED)
    .bind(description.unwrap_or_else(|| format!("Transfer from account {source_number}")))
    .fetch_one(&mut *tx)
    .await?;

    // Commit ALL changes atomically
    // If this fails, everything rolls back
    tx.commit().await?;

    Ok((sent, received))
}

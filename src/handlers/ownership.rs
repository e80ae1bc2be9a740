//! Account-ownership HTTP handlers.
//!
//! Attach and detach holders on accounts, and list either side of the
//! many-to-many relation. The one business rule here: an account must keep
//! at least one owner, so detaching the sole owner is rejected.

use crate::{
    db::DbPool,
    error::AppError,
    models::ownership::{
        AccountOwner, AccountOwnerDetail, CreateOwnerRequest, HolderAccountDetail,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Attach a holder to an account as an owner.
///
/// # Response
///
/// - **Success (201 Created)**: the new ownership row
/// - **Error (404)**: account or holder doesn't exist
/// - **Error (422)**: the holder already owns the account
pub async fn create_owner(
    State(pool): State<DbPool>,
    Json(request): Json<CreateOwnerRequest>,
) -> Result<(StatusCode, Json<AccountOwner>), AppError> {
    let account_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
            .bind(request.account_id)
            .fetch_one(&pool)
            .await?;

    if !account_exists {
        return Err(AppError::NotFound(format!(
            "account {}",
            request.account_id
        )));
    }

    let holder_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM holders WHERE id = $1)")
            .bind(request.holder_id)
            .fetch_one(&pool)
            .await?;

    if !holder_exists {
        return Err(AppError::NotFound(format!("holder {}", request.holder_id)));
    }

    let already_owner: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM account_owners WHERE account_id = $1 AND holder_id = $2)",
    )
    .bind(request.account_id)
    .bind(request.holder_id)
    .fetch_one(&pool)
    .await?;

    if already_owner {
        return Err(AppError::InvalidOperation(
            "The holder already owns this account".to_string(),
        ));
    }

    let owner = sqlx::query_as::<_, AccountOwner>(
        "INSERT INTO account_owners (account_id, holder_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(request.account_id)
    .bind(request.holder_id)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(owner)))
}

/// Detach a holder from an account.
///
/// # Response
///
/// - **Success (204 No Content)**
/// - **Error (404)**: the ownership row doesn't exist
/// - **Error (422)**: the holder is the account's sole owner
pub async fn delete_owner(
    State(pool): State<DbPool>,
    Path((account_id, holder_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM account_owners WHERE account_id = $1 AND holder_id = $2)",
    )
    .bind(account_id)
    .bind(holder_id)
    .fetch_one(&pool)
    .await?;

    if !exists {
        return Err(AppError::NotFound(format!(
            "ownership of account {account_id} by holder {holder_id}"
        )));
    }

    // An account must keep at least one owner
    let owner_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM account_owners WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(&pool)
            .await?;

    if owner_count <= 1 {
        return Err(AppError::InvalidOperation(
            "Cannot remove the sole owner of an account".to_string(),
        ));
    }

    sqlx::query("DELETE FROM account_owners WHERE account_id = $1 AND holder_id = $2")
        .bind(account_id)
        .bind(holder_id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the owners of one account, joined with holder details.
pub async fn list_owners_by_account(
    State(pool): State<DbPool>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<AccountOwnerDetail>>, AppError> {
    let owners = sqlx::query_as::<_, AccountOwnerDetail>(
        r#"
        SELECT ao.account_id, ao.holder_id,
               h.name AS holder_name, h.document AS holder_document,
               a.number AS account_number
        FROM account_owners ao
        JOIN holders h ON h.id = ao.holder_id
        JOIN accounts a ON a.id = ao.account_id
        WHERE ao.account_id = $1
        ORDER BY ao.holder_id
        "#,
    )
    .bind(account_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(owners))
}

/// List the accounts owned by one holder, joined with account details.
pub async fn list_accounts_by_holder(
    State(pool): State<DbPool>,
    Path(holder_id): Path<i64>,
) -> Result<Json<Vec<HolderAccountDetail>>, AppError> {
    let accounts = sqlx::query_as::<_, HolderAccountDetail>(
        r#"
        SELECT ao.account_id, ao.holder_id,
               a.number AS account_number, a.balance,
               h.name AS holder_name
        FROM account_owners ao
        JOIN accounts a ON a.id = ao.account_id
        JOIN holders h ON h.id = ao.holder_id
        WHERE ao.holder_id = $1
        ORDER BY ao.account_id
        "#,
    )
    .bind(holder_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(accounts))
}

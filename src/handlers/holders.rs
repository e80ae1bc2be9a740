//! Account-holder HTTP handlers.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        Pagination,
        holder::{CreateHolderRequest, Holder, HolderResponse, UpdateHolderRequest},
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

/// Create an account holder.
///
/// # Validation
///
/// - `document` must be unique across all holders
///
/// # Response
///
/// - **Success (201 Created)**: the created holder, PIN omitted
/// - **Error (422)**: duplicate document
pub async fn create_holder(
    State(pool): State<DbPool>,
    Json(request): Json<CreateHolderRequest>,
) -> Result<(StatusCode, Json<HolderResponse>), AppError> {
    // Documents identify a person; one holder per document
    let document_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM holders WHERE document = $1)")
            .bind(&request.document)
            .fetch_one(&pool)
            .await?;

    if document_taken {
        return Err(AppError::InvalidOperation(format!(
            "A holder with document {} already exists",
            request.document
        )));
    }

    let holder = sqlx::query_as::<_, Holder>(
        r#"
        INSERT INTO holders (name, document_type_id, document, address, phone, city_id, pin)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.document_type_id)
    .bind(request.document)
    .bind(request.address)
    .bind(request.phone)
    .bind(request.city_id)
    .bind(request.pin)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(holder.into())))
}

/// List holders with offset/limit.
pub async fn list_holders(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<HolderResponse>>, AppError> {
    let holders =
        sqlx::query_as::<_, Holder>("SELECT * FROM holders ORDER BY id OFFSET $1 LIMIT $2")
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&pool)
            .await?;

    Ok(Json(holders.into_iter().map(Into::into).collect()))
}

/// Get a holder by id.
pub async fn get_holder(
    State(pool): State<DbPool>,
    Path(holder_id): Path<i64>,
) -> Result<Json<HolderResponse>, AppError> {
    let holder = sqlx::query_as::<_, Holder>("SELECT * FROM holders WHERE id = $1")
        .bind(holder_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("holder {holder_id}")))?;

    Ok(Json(holder.into()))
}

/// Get a holder by document number.
pub async fn get_holder_by_document(
    State(pool): State<DbPool>,
    Path(document): Path<String>,
) -> Result<Json<HolderResponse>, AppError> {
    let holder = sqlx::query_as::<_, Holder>("SELECT * FROM holders WHERE document = $1")
        .bind(&document)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("holder with document {document}")))?;

    Ok(Json(holder.into()))
}

/// Partially update a holder. The document itself is not updatable.
pub async fn update_holder(
    State(pool): State<DbPool>,
    Path(holder_id): Path<i64>,
    Json(request): Json<UpdateHolderRequest>,
) -> Result<Json<HolderResponse>, AppError> {
    let holder = sqlx::query_as::<_, Holder>(
        r#"
        UPDATE holders
        SET name = COALESCE($1, name),
            document_type_id = COALESCE($2, document_type_id),
            address = COALESCE($3, address),
            phone = COALESCE($4, phone),
            city_id = COALESCE($5, city_id),
            pin = COALESCE($6, pin)
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.document_type_id)
    .bind(request.address)
    .bind(request.phone)
    .bind(request.city_id)
    .bind(request.pin)
    .bind(holder_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("holder {holder_id}")))?;

    Ok(Json(holder.into()))
}

/// Delete a holder. Ownership rows cascade at the storage level.
pub async fn delete_holder(
    State(pool): State<DbPool>,
    Path(holder_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM holders WHERE id = $1")
        .bind(holder_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("holder {holder_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

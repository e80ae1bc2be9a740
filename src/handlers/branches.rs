//! Branch HTTP handlers.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        Pagination,
        branch::{Branch, CreateBranchRequest, UpdateBranchRequest},
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

/// Create a branch.
///
/// `POST /api/v1/branches` — returns 201 with the created row. Invalid
/// city or branch-type references surface as foreign-key database errors.
pub async fn create_branch(
    State(pool): State<DbPool>,
    Json(request): Json<CreateBranchRequest>,
) -> Result<(StatusCode, Json<Branch>), AppError> {
    let branch = sqlx::query_as::<_, Branch>(
        r#"
        INSERT INTO branches (name, city_id, branch_type_id, address, phone, opening_hours)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.city_id)
    .bind(request.branch_type_id)
    .bind(request.address)
    .bind(request.phone)
    .bind(request.opening_hours)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(branch)))
}

/// List branches with offset/limit.
pub async fn list_branches(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Branch>>, AppError> {
    let branches =
        sqlx::query_as::<_, Branch>("SELECT * FROM branches ORDER BY id OFFSET $1 LIMIT $2")
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&pool)
            .await?;

    Ok(Json(branches))
}

/// Get a branch by id.
pub async fn get_branch(
    State(pool): State<DbPool>,
    Path(branch_id): Path<i64>,
) -> Result<Json<Branch>, AppError> {
    let branch = sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
        .bind(branch_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("branch {branch_id}")))?;

    Ok(Json(branch))
}

/// List the branches of one city.
pub async fn list_branches_by_city(
    State(pool): State<DbPool>,
    Path(city_id): Path<i64>,
) -> Result<Json<Vec<Branch>>, AppError> {
    let branches =
        sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE city_id = $1 ORDER BY id")
            .bind(city_id)
            .fetch_all(&pool)
            .await?;

    Ok(Json(branches))
}

/// Partially update a branch. Absent fields keep their current value.
pub async fn update_branch(
    State(pool): State<DbPool>,
    Path(branch_id): Path<i64>,
    Json(request): Json<UpdateBranchRequest>,
) -> Result<Json<Branch>, AppError> {
    let branch = sqlx::query_as::<_, Branch>(
        r#"
        UPDATE branches
        SET name = COALESCE($1, name),
            city_id = COALESCE($2, city_id),
            branch_type_id = COALESCE($3, branch_type_id),
            address = COALESCE($4, address),
            phone = COALESCE($5, phone),
            opening_hours = COALESCE($6, opening_hours)
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(request.name)
    .bind(request.city_id)
    .bind(request.branch_type_id)
    .bind(request.address)
    .bind(request.phone)
    .bind(request.opening_hours)
    .bind(branch_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("branch {branch_id}")))?;

    Ok(Json(branch))
}

/// Delete a branch.
pub async fn delete_branch(
    State(pool): State<DbPool>,
    Path(branch_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM branches WHERE id = $1")
        .bind(branch_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("branch {branch_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

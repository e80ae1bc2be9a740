//! Catalog table HTTP handlers.
//!
//! Cities, document types, account types, movement types and branch types
//! share the same mechanical CRUD shape: insert returning the row, list with
//! offset/limit, get by id, full-replace update, delete. The five groups
//! below only differ in table and columns.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        Pagination,
        catalog::{
            AccountType, AccountTypeRequest, BranchType, BranchTypeRequest, City, CityRequest,
            DocumentType, DocumentTypeRequest, MovementType, MovementTypeRequest,
        },
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

// --- Cities ---

/// Create a city.
///
/// `POST /api/v1/cities` — returns 201 with the created row.
pub async fn create_city(
    State(pool): State<DbPool>,
    Json(request): Json<CityRequest>,
) -> Result<(StatusCode, Json<City>), AppError> {
    let city = sqlx::query_as::<_, City>("INSERT INTO cities (name) VALUES ($1) RETURNING *")
        .bind(request.name)
        .fetch_one(&pool)
        .await?;

    Ok((StatusCode::CREATED, Json(city)))
}

/// List cities with offset/limit.
pub async fn list_cities(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<City>>, AppError> {
    let cities =
        sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY id OFFSET $1 LIMIT $2")
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(&pool)
            .await?;

    Ok(Json(cities))
}

/// Get a city by id. Returns 404 when absent.
pub async fn get_city(
    State(pool): State<DbPool>,
    Path(city_id): Path<i64>,
) -> Result<Json<City>, AppError> {
    let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
        .bind(city_id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("city {city_id}")))?;

    Ok(Json(city))
}

/// Replace a city's fields.
pub async fn update_city(
    State(pool): State<DbPool>,
    Path(city_id): Path<i64>,
    Json(request): Json<CityRequest>,
) -> Result<Json<City>, AppError> {
    let city =
        sqlx::query_as::<_, City>("UPDATE cities SET name = $1 WHERE id = $2 RETURNING *")
            .bind(request.name)
            .bind(city_id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("city {city_id}")))?;

    Ok(Json(city))
}

/// Delete a city. Returns 204 on success, 404 when absent.
pub async fn delete_city(
    State(pool): State<DbPool>,
    Path(city_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM cities WHERE id = $1")
        .bind(city_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("city {city_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

// --- Document types ---

pub async fn create_document_type(
    State(pool): State<DbPool>,
    Json(request): Json<DocumentTypeRequest>,
) -> Result<(StatusCode, Json<DocumentType>), AppError> {
    let doc_type = sqlx::query_as::<_, DocumentType>(
        "INSERT INTO document_types (name, abbreviation) VALUES ($1, $2) RETURNING *",
    )
    .bind(request.name)
    .bind(request.abbreviation)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(doc_type)))
}

pub async fn list_document_types(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<DocumentType>>, AppError> {
    let types = sqlx::query_as::<_, DocumentType>(
        "SELECT * FROM document_types ORDER BY id OFFSET $1 LIMIT $2",
    )
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(types))
}

pub async fn get_document_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<Json<DocumentType>, AppError> {
    let doc_type =
        sqlx::query_as::<_, DocumentType>("SELECT * FROM document_types WHERE id = $1")
            .bind(type_id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("document type {type_id}")))?;

    Ok(Json(doc_type))
}

pub async fn update_document_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
    Json(request): Json<DocumentTypeRequest>,
) -> Result<Json<DocumentType>, AppError> {
    let doc_type = sqlx::query_as::<_, DocumentType>(
        "UPDATE document_types SET name = $1, abbreviation = $2 WHERE id = $3 RETURNING *",
    )
    .bind(request.name)
    .bind(request.abbreviation)
    .bind(type_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("document type {type_id}")))?;

    Ok(Json(doc_type))
}

pub async fn delete_document_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM document_types WHERE id = $1")
        .bind(type_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("document type {type_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

// --- Account types ---

pub async fn create_account_type(
    State(pool): State<DbPool>,
    Json(request): Json<AccountTypeRequest>,
) -> Result<(StatusCode, Json<AccountType>), AppError> {
    let account_type = sqlx::query_as::<_, AccountType>(
        "INSERT INTO account_types (name, overdraft_limit) VALUES ($1, $2) RETURNING *",
    )
    .bind(request.name)
    .bind(request.overdraft_limit)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(account_type)))
}

pub async fn list_account_types(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<AccountType>>, AppError> {
    let types = sqlx::query_as::<_, AccountType>(
        "SELECT * FROM account_types ORDER BY id OFFSET $1 LIMIT $2",
    )
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(types))
}

pub async fn get_account_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<Json<AccountType>, AppError> {
    let account_type =
        sqlx::query_as::<_, AccountType>("SELECT * FROM account_types WHERE id = $1")
            .bind(type_id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("account type {type_id}")))?;

    Ok(Json(account_type))
}

pub async fn update_account_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
    Json(request): Json<AccountTypeRequest>,
) -> Result<Json<AccountType>, AppError> {
    let account_type = sqlx::query_as::<_, AccountType>(
        "UPDATE account_types SET name = $1, overdraft_limit = $2 WHERE id = $3 RETURNING *",
    )
    .bind(request.name)
    .bind(request.overdraft_limit)
    .bind(type_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("account type {type_id}")))?;

    Ok(Json(account_type))
}

pub async fn delete_account_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM account_types WHERE id = $1")
        .bind(type_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("account type {type_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

// --- Movement types ---

pub async fn create_movement_type(
    State(pool): State<DbPool>,
    Json(request): Json<MovementTypeRequest>,
) -> Result<(StatusCode, Json<MovementType>), AppError> {
    let movement_type = sqlx::query_as::<_, MovementType>(
        "INSERT INTO movement_types (name) VALUES ($1) RETURNING *",
    )
    .bind(request.name)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(movement_type)))
}

pub async fn list_movement_types(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<MovementType>>, AppError> {
    let types = sqlx::query_as::<_, MovementType>(
        "SELECT * FROM movement_types ORDER BY id OFFSET $1 LIMIT $2",
    )
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(types))
}

pub async fn get_movement_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<Json<MovementType>, AppError> {
    let movement_type =
        sqlx::query_as::<_, MovementType>("SELECT * FROM movement_types WHERE id = $1")
            .bind(type_id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movement type {type_id}")))?;

    Ok(Json(movement_type))
}

pub async fn update_movement_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
    Json(request): Json<MovementTypeRequest>,
) -> Result<Json<MovementType>, AppError> {
    let movement_type = sqlx::query_as::<_, MovementType>(
        "UPDATE movement_types SET name = $1 WHERE id = $2 RETURNING *",
    )
    .bind(request.name)
    .bind(type_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("movement type {type_id}")))?;

    Ok(Json(movement_type))
}

pub async fn delete_movement_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM movement_types WHERE id = $1")
        .bind(type_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("movement type {type_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

// --- Branch types ---

pub async fn create_branch_type(
    State(pool): State<DbPool>,
    Json(request): Json<BranchTypeRequest>,
) -> Result<(StatusCode, Json<BranchType>), AppError> {
    let branch_type =
        sqlx::query_as::<_, BranchType>("INSERT INTO branch_types (name) VALUES ($1) RETURNING *")
            .bind(request.name)
            .fetch_one(&pool)
            .await?;

    Ok((StatusCode::CREATED, Json(branch_type)))
}

pub async fn list_branch_types(
    State(pool): State<DbPool>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<BranchType>>, AppError> {
    let types = sqlx::query_as::<_, BranchType>(
        "SELECT * FROM branch_types ORDER BY id OFFSET $1 LIMIT $2",
    )
    .bind(page.skip)
    .bind(page.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(types))
}

pub async fn get_branch_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<Json<BranchType>, AppError> {
    let branch_type =
        sqlx::query_as::<_, BranchType>("SELECT * FROM branch_types WHERE id = $1")
            .bind(type_id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("branch type {type_id}")))?;

    Ok(Json(branch_type))
}

pub async fn update_branch_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
    Json(request): Json<BranchTypeRequest>,
) -> Result<Json<BranchType>, AppError> {
    let branch_type = sqlx::query_as::<_, BranchType>(
        "UPDATE branch_types SET name = $1 WHERE id = $2 RETURNING *",
    )
    .bind(request.name)
    .bind(type_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("branch type {type_id}")))?;

    Ok(Json(branch_type))
}

pub async fn delete_branch_type(
    State(pool): State<DbPool>,
    Path(type_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM branch_types WHERE id = $1")
        .bind(type_id)
        .execute(&pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::NotFound(format!("branch type {type_id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

//! Shared fixtures for the database-backed integration tests.
//!
//! Every `#[sqlx::test]` gets a fresh database with the migrations (and
//! therefore the seeded type catalogs) already applied; these helpers build
//! the minimal referenced rows on top of that.

#![allow(dead_code)]

use chrono::NaiveDate;
use corebank::db::DbPool;
use rust_decimal::Decimal;

/// Insert a city and a branch of type 1 (Main Office, from the seeds),
/// returning the branch id.
pub async fn seed_branch(pool: &DbPool) -> i64 {
    let city_id: i64 = sqlx::query_scalar("INSERT INTO cities (name) VALUES ('Testville') RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap();

    sqlx::query_scalar(
        "INSERT INTO branches (name, city_id, branch_type_id) VALUES ('Test Branch', $1, 1) RETURNING id",
    )
    .bind(city_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an account of type 1 (Savings, from the seeds) with the given
/// number, balance and overdraft limit, returning its id.
pub async fn seed_account(
    pool: &DbPool,
    branch_id: i64,
    number: &str,
    balance: Decimal,
    overdraft_limit: Decimal,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO accounts (number, opening_date, account_type_id, branch_id, balance, overdraft_limit)
        VALUES ($1, $2, 1, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(number)
    .bind(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    .bind(branch_id)
    .bind(balance)
    .bind(overdraft_limit)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a holder with document type 1 (National ID, from the seeds),
/// returning their id.
pub async fn seed_holder(pool: &DbPool, document: &str) -> i64 {
    let city_id: i64 =
        sqlx::query_scalar("INSERT INTO cities (name) VALUES ('Holderville') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();

    sqlx::query_scalar(
        r#"
        INSERT INTO holders (name, document_type_id, document, city_id, pin)
        VALUES ('Test Holder', 1, $1, $2, '0000')
        RETURNING id
        "#,
    )
    .bind(document)
    .bind(city_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Read back an account's balance and unauthorized-overdraft flag.
pub async fn account_state(pool: &DbPool, account_id: i64) -> (Decimal, bool) {
    sqlx::query_as("SELECT balance, unauthorized_overdraft FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Count the movements recorded against one account.
pub async fn movement_count(pool: &DbPool, account_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM movements WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

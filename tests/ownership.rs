//! Integration tests for account ownership: attach, detach and the
//! sole-owner rule.

mod common;

use axum::{
    Json,
    extract::{Path, State},
};
use common::{seed_account, seed_branch, seed_holder};
use corebank::{
    error::AppError, handlers::ownership, models::ownership::CreateOwnerRequest,
};
use rust_decimal_macros::dec;
use sqlx::PgPool;

#[sqlx::test]
async fn attach_and_list_owners(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;
    let holder_id = seed_holder(&pool, "CC100").await;

    let (_, Json(owner)) = ownership::create_owner(
        State(pool.clone()),
        Json(CreateOwnerRequest {
            account_id,
            holder_id,
        }),
    )
    .await
    .unwrap();

    assert_eq!(owner.account_id, account_id);
    assert_eq!(owner.holder_id, holder_id);

    let Json(owners) = ownership::list_owners_by_account(State(pool.clone()), Path(account_id))
        .await
        .unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].holder_document, "CC100");
    assert_eq!(owners[0].account_number, "1000000001");

    let Json(accounts) = ownership::list_accounts_by_holder(State(pool), Path(holder_id))
        .await
        .unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].balance, dec!(0));
}

#[sqlx::test]
async fn duplicate_attach_is_rejected(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;
    let holder_id = seed_holder(&pool, "CC100").await;

    ownership::create_owner(
        State(pool.clone()),
        Json(CreateOwnerRequest {
            account_id,
            holder_id,
        }),
    )
    .await
    .unwrap();

    let err = ownership::create_owner(
        State(pool),
        Json(CreateOwnerRequest {
            account_id,
            holder_id,
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidOperation(_)));
}

#[sqlx::test]
async fn attach_to_missing_account_fails(pool: PgPool) {
    seed_branch(&pool).await;
    let holder_id = seed_holder(&pool, "CC100").await;

    let err = ownership::create_owner(
        State(pool),
        Json(CreateOwnerRequest {
            account_id: 9999,
            holder_id,
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test]
async fn detaching_the_sole_owner_is_rejected(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;
    let holder_id = seed_holder(&pool, "CC100").await;

    ownership::create_owner(
        State(pool.clone()),
        Json(CreateOwnerRequest {
            account_id,
            holder_id,
        }),
    )
    .await
    .unwrap();

    let err = ownership::delete_owner(State(pool.clone()), Path((account_id, holder_id)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidOperation(_)));

    // The ownership row survived
    let Json(owners) = ownership::list_owners_by_account(State(pool), Path(account_id))
        .await
        .unwrap();
    assert_eq!(owners.len(), 1);
}

#[sqlx::test]
async fn detach_with_a_second_owner_succeeds(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;
    let first = seed_holder(&pool, "CC100").await;
    let second = seed_holder(&pool, "CC200").await;

    for holder_id in [first, second] {
        ownership::create_owner(
            State(pool.clone()),
            Json(CreateOwnerRequest {
                account_id,
                holder_id,
            }),
        )
        .await
        .unwrap();
    }

    ownership::delete_owner(State(pool.clone()), Path((account_id, second)))
        .await
        .unwrap();

    let Json(owners) = ownership::list_owners_by_account(State(pool), Path(account_id))
        .await
        .unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].holder_id, first);
}

#[sqlx::test]
async fn detaching_a_nonexistent_ownership_fails(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;
    let holder_id = seed_holder(&pool, "CC100").await;

    let err = ownership::delete_owner(State(pool), Path((account_id, holder_id)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

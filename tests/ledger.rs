//! Integration tests for the ledger engine: deposits, withdrawals,
//! transfers, overdraft flagging and movement immutability.

mod common;

use axum::{
    Json,
    extract::{Path, State},
};
use common::{account_state, movement_count, seed_account, seed_branch};
use corebank::{
    error::AppError,
    handlers,
    models::movement::{
        TYPE_DEPOSIT, TYPE_TRANSFER_RECEIVED, TYPE_TRANSFER_SENT, TYPE_WITHDRAWAL,
        UpdateMovementRequest,
    },
    services::ledger,
};
use rust_decimal_macros::dec;
use sqlx::PgPool;

#[sqlx::test]
async fn deposit_increases_balance_and_records_movement(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(0)).await;

    let movement = ledger::deposit(&pool, account_id, dec!(40.00), branch_id, None)
        .await
        .unwrap();

    assert_eq!(movement.account_id, account_id);
    assert_eq!(movement.value, dec!(40.00));
    assert_eq!(movement.movement_type_id, TYPE_DEPOSIT);
    assert_eq!(movement.description.as_deref(), Some("Deposit"));

    let (balance, flagged) = account_state(&pool, account_id).await;
    assert_eq!(balance, dec!(140.00));
    assert!(!flagged);
    assert_eq!(movement_count(&pool, account_id).await, 1);
}

#[sqlx::test]
async fn deposit_to_missing_account_fails(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;

    let err = ledger::deposit(&pool, 9999, dec!(40.00), branch_id, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test]
async fn deposit_rejects_non_positive_amount(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(0)).await;

    let err = ledger::deposit(&pool, account_id, dec!(0), branch_id, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidRequest(_)));
    assert_eq!(movement_count(&pool, account_id).await, 0);
}

#[sqlx::test]
async fn withdrawal_within_available_balance(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(0)).await;

    let movement = ledger::withdraw(
        &pool,
        account_id,
        dec!(60.00),
        branch_id,
        Some("Rent".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(movement.value, dec!(-60.00));
    assert_eq!(movement.movement_type_id, TYPE_WITHDRAWAL);
    assert_eq!(movement.description.as_deref(), Some("Rent"));

    let (balance, flagged) = account_state(&pool, account_id).await;
    assert_eq!(balance, dec!(40.00));
    assert!(!flagged);
}

#[sqlx::test]
async fn withdrawal_beyond_available_fails_and_changes_nothing(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(0)).await;

    let err = ledger::withdraw(&pool, account_id, dec!(150.00), branch_id, None)
        .await
        .unwrap_err();

    match err {
        AppError::InsufficientFunds {
            available,
            requested,
        } => {
            assert_eq!(available, dec!(100.00));
            assert_eq!(requested, dec!(150.00));
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }

    let (balance, flagged) = account_state(&pool, account_id).await;
    assert_eq!(balance, dec!(100.00));
    assert!(!flagged);
    assert_eq!(movement_count(&pool, account_id).await, 0);
}

#[sqlx::test]
async fn withdrawal_into_overdraft_sets_flag(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(50.00)).await;

    let movement = ledger::withdraw(&pool, account_id, dec!(130.00), branch_id, None)
        .await
        .unwrap();

    assert_eq!(movement.value, dec!(-130.00));

    let (balance, flagged) = account_state(&pool, account_id).await;
    assert_eq!(balance, dec!(-30.00));
    assert!(flagged);
}

#[sqlx::test]
async fn withdrawal_past_the_overdraft_limit_fails(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(50.00)).await;

    let err = ledger::withdraw(&pool, account_id, dec!(151.00), branch_id, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InsufficientFunds { .. }));

    let (balance, _) = account_state(&pool, account_id).await;
    assert_eq!(balance, dec!(100.00));
}

#[sqlx::test]
async fn transfer_conserves_total_and_writes_two_movements(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let source_id = seed_account(&pool, branch_id, "1000000001", dec!(500.00), dec!(0)).await;
    let dest_id = seed_account(&pool, branch_id, "1000000002", dec!(100.00), dec!(0)).await;

    let (sent, received) = ledger::transfer(&pool, source_id, dest_id, dec!(200.00), branch_id, None)
        .await
        .unwrap();

    assert_eq!(sent.account_id, source_id);
    assert_eq!(sent.value, dec!(-200.00));
    assert_eq!(sent.movement_type_id, TYPE_TRANSFER_SENT);
    assert_eq!(
        sent.description.as_deref(),
        Some("Transfer to account 1000000002")
    );

    assert_eq!(received.account_id, dest_id);
    assert_eq!(received.value, dec!(200.00));
    assert_eq!(received.movement_type_id, TYPE_TRANSFER_RECEIVED);
    assert_eq!(
        received.description.as_deref(),
        Some("Transfer from account 1000000001")
    );

    let (source_balance, source_flagged) = account_state(&pool, source_id).await;
    let (dest_balance, _) = account_state(&pool, dest_id).await;
    assert_eq!(source_balance, dec!(300.00));
    assert_eq!(dest_balance, dec!(300.00));
    assert!(!source_flagged);

    // The sum of both balances is invariant: 500 + 100 before, 300 + 300 after
    assert_eq!(source_balance + dest_balance, dec!(600.00));
}

#[sqlx::test]
async fn transfer_with_insufficient_funds_changes_nothing(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let source_id = seed_account(&pool, branch_id, "1000000001", dec!(50.00), dec!(0)).await;
    let dest_id = seed_account(&pool, branch_id, "1000000002", dec!(100.00), dec!(0)).await;

    let err = ledger::transfer(&pool, source_id, dest_id, dec!(200.00), branch_id, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InsufficientFunds { .. }));

    let (source_balance, _) = account_state(&pool, source_id).await;
    let (dest_balance, _) = account_state(&pool, dest_id).await;
    assert_eq!(source_balance, dec!(50.00));
    assert_eq!(dest_balance, dec!(100.00));
    assert_eq!(movement_count(&pool, source_id).await, 0);
    assert_eq!(movement_count(&pool, dest_id).await, 0);
}

#[sqlx::test]
async fn transfer_into_overdraft_flags_the_source(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let source_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(50.00)).await;
    let dest_id = seed_account(&pool, branch_id, "1000000002", dec!(0), dec!(0)).await;

    ledger::transfer(&pool, source_id, dest_id, dec!(130.00), branch_id, None)
        .await
        .unwrap();

    let (source_balance, source_flagged) = account_state(&pool, source_id).await;
    let (dest_balance, dest_flagged) = account_state(&pool, dest_id).await;
    assert_eq!(source_balance, dec!(-30.00));
    assert!(source_flagged);
    assert_eq!(dest_balance, dec!(130.00));
    assert!(!dest_flagged);
}

#[sqlx::test]
async fn transfer_to_missing_destination_fails_whole(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let source_id = seed_account(&pool, branch_id, "1000000001", dec!(500.00), dec!(0)).await;

    let err = ledger::transfer(&pool, source_id, 9999, dec!(200.00), branch_id, None)
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(what) => assert!(what.contains("destination")),
        other => panic!("expected NotFound, got {other:?}"),
    }

    let (source_balance, _) = account_state(&pool, source_id).await;
    assert_eq!(source_balance, dec!(500.00));
    assert_eq!(movement_count(&pool, source_id).await, 0);
}

#[sqlx::test]
async fn self_transfer_at_engine_level_nets_zero(pool: PgPool) {
    // The handler rejects equal ids; the engine itself tolerates them with
    // two movements and no net balance change.
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(500.00), dec!(0)).await;

    let (sent, received) =
        ledger::transfer(&pool, account_id, account_id, dec!(200.00), branch_id, None)
            .await
            .unwrap();

    assert_eq!(sent.value, dec!(-200.00));
    assert_eq!(received.value, dec!(200.00));

    let (balance, _) = account_state(&pool, account_id).await;
    assert_eq!(balance, dec!(500.00));
    assert_eq!(movement_count(&pool, account_id).await, 2);
}

#[sqlx::test]
async fn movement_description_is_the_only_mutable_field(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(100.00), dec!(0)).await;

    let movement = ledger::deposit(&pool, account_id, dec!(40.00), branch_id, None)
        .await
        .unwrap();

    let Json(updated) = handlers::movements::update_movement(
        State(pool.clone()),
        Path(movement.id),
        Json(UpdateMovementRequest {
            description: Some("Corrected memo".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(updated.description.as_deref(), Some("Corrected memo"));
    // Everything else is untouched
    assert_eq!(updated.value, movement.value);
    assert_eq!(updated.account_id, movement.account_id);
    assert_eq!(updated.movement_type_id, movement.movement_type_id);
    assert_eq!(updated.date, movement.date);
}

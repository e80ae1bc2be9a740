//! Integration tests for loan creation and the installment recompute rule.

mod common;

use chrono::NaiveDate;
use common::{seed_account, seed_branch};
use corebank::{
    error::AppError,
    models::loan::{CreateLoanRequest, UpdateLoanRequest},
    services::loans,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;

fn loan_request(account_id: i64, number: &str, installment: Option<Decimal>) -> CreateLoanRequest {
    CreateLoanRequest {
        account_id,
        number: number.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        principal: dec!(10000000.00),
        interest_rate: dec!(12.50),
        term_months: 36,
        insurance: Some(dec!(50000.00)),
        installment,
    }
}

#[sqlx::test]
async fn creation_fills_installment_when_omitted(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;

    let loan = loans::create_loan(&pool, loan_request(account_id, "L20240001", None))
        .await
        .unwrap();

    assert_eq!(loan.installment, dec!(384536.26));
    assert_eq!(loan.principal, dec!(10000000.00));
    assert_eq!(loan.term_months, 36);
}

#[sqlx::test]
async fn explicit_installment_is_respected(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;

    let loan = loans::create_loan(
        &pool,
        loan_request(account_id, "L20240001", Some(dec!(400000.00))),
    )
    .await
    .unwrap();

    assert_eq!(loan.installment, dec!(400000.00));
}

#[sqlx::test]
async fn duplicate_loan_number_is_rejected(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;

    loans::create_loan(&pool, loan_request(account_id, "L20240001", None))
        .await
        .unwrap();

    let err = loans::create_loan(&pool, loan_request(account_id, "L20240001", None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidOperation(_)));
}

#[sqlx::test]
async fn loan_on_missing_account_fails(pool: PgPool) {
    seed_branch(&pool).await;

    let err = loans::create_loan(&pool, loan_request(9999, "L20240001", None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[sqlx::test]
async fn updating_terms_recomputes_installment(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;

    let loan = loans::create_loan(&pool, loan_request(account_id, "L20240001", None))
        .await
        .unwrap();

    // Dropping the rate to zero: principal / term + insurance exactly
    let updated = loans::update_loan(
        &pool,
        loan.id,
        UpdateLoanRequest {
            interest_rate: Some(dec!(0)),
            term_months: None,
            insurance: None,
            installment: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.interest_rate, dec!(0));
    assert_eq!(updated.installment, dec!(327777.78)); // 10,000,000 / 36 + 50,000
}

#[sqlx::test]
async fn explicit_installment_wins_over_recompute(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;

    let loan = loans::create_loan(&pool, loan_request(account_id, "L20240001", None))
        .await
        .unwrap();

    let updated = loans::update_loan(
        &pool,
        loan.id,
        UpdateLoanRequest {
            interest_rate: None,
            term_months: Some(48),
            insurance: None,
            installment: Some(dec!(300000.00)),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.term_months, 48);
    assert_eq!(updated.installment, dec!(300000.00));
}

#[sqlx::test]
async fn update_without_term_changes_keeps_installment(pool: PgPool) {
    let branch_id = seed_branch(&pool).await;
    let account_id = seed_account(&pool, branch_id, "1000000001", dec!(0), dec!(0)).await;

    let loan = loans::create_loan(&pool, loan_request(account_id, "L20240001", None))
        .await
        .unwrap();

    let updated = loans::update_loan(
        &pool,
        loan.id,
        UpdateLoanRequest {
            interest_rate: None,
            term_months: None,
            insurance: None,
            installment: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.installment, loan.installment);
}

#[sqlx::test]
async fn updating_missing_loan_fails(pool: PgPool) {
    seed_branch(&pool).await;

    let err = loans::update_loan(
        &pool,
        9999,
        UpdateLoanRequest {
            interest_rate: Some(dec!(5)),
            term_months: None,
            insurance: None,
            installment: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

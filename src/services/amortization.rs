//! Loan amortization calculator.
//!
//! Computes the level monthly payment of a loan under the French/annuity
//! amortization method:
//!
//! ```text
//! installment = P * (i * (1 + i)^n) / ((1 + i)^n - 1) + insurance
//! ```
//!
//! where `P` is the principal, `i` the monthly rate (annual rate / 12 / 100)
//! and `n` the term in months. A zero rate degenerates to `P / n`.
//!
//! The function is pure: it touches no storage and identical inputs always
//! produce identical outputs. Inputs are trusted to be pre-validated by the
//! request layer (principal > 0, rate in [0, 100], term >= 1).

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

/// Result of an installment computation, each figure rounded to 2 decimal
/// places, half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentQuote {
    /// Level monthly payment, insurance included
    pub installment: Decimal,

    /// `installment * term`, computed before rounding the installment
    pub total_repayment: Decimal,

    /// `total_repayment - principal`
    pub total_interest: Decimal,
}

/// Compute the monthly installment, total repayment and total interest for
/// the given loan terms.
///
/// Internally computed in f64; the exponentiation dominates the result and
/// is well within f64 precision for terms up to 360 months, and the output
/// is rounded to cents anyway.
pub fn installment_quote(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: i32,
    insurance: Decimal,
) -> InstallmentQuote {
    let principal_f = principal.to_f64().unwrap_or_default();
    let annual_rate = annual_rate_percent.to_f64().unwrap_or_default();
    let insurance_f = insurance.to_f64().unwrap_or_default();
    let term = f64::from(term_months);

    // A zero rate means no interest: the capital installment is simply the
    // principal spread evenly over the term.
    let installment = if annual_rate == 0.0 {
        principal_f / term + insurance_f
    } else {
        let i = annual_rate / 12.0 / 100.0;
        let compounded = (1.0 + i).powi(term_months);
        let factor = (i * compounded) / (compounded - 1.0);
        principal_f * factor + insurance_f
    };

    let total_repayment = installment * term;
    let total_interest = total_repayment - principal_f;

    InstallmentQuote {
        installment: round_cents(installment),
        total_repayment: round_cents(total_repayment),
        total_interest: round_cents(total_interest),
    }
}

/// Round to 2 decimal places, half away from zero.
fn round_cents(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_rate_is_principal_over_term_plus_insurance() {
        let quote = installment_quote(dec!(12000), dec!(0), 24, dec!(10));
        assert_eq!(quote.installment, dec!(510.00));
        assert_eq!(quote.total_repayment, dec!(12240.00));
        assert_eq!(quote.total_interest, dec!(240.00));
    }

    #[test]
    fn standard_mortgage_vector() {
        // 200,000 at 6% annual over 30 years: the textbook 1,199.10.
        let quote = installment_quote(dec!(200000), dec!(6), 360, Decimal::ZERO);
        assert_eq!(quote.installment, dec!(1199.10));
    }

    #[test]
    fn large_loan_with_insurance() {
        let quote = installment_quote(dec!(10000000), dec!(12.50), 36, dec!(50000));
        assert_eq!(quote.installment, dec!(384536.26));
        assert_eq!(quote.total_repayment, dec!(13843305.21));
        assert_eq!(quote.total_interest, dec!(3843305.21));
    }

    #[test]
    fn short_high_rate_loan() {
        let quote = installment_quote(dec!(1000000), dec!(24), 12, Decimal::ZERO);
        assert_eq!(quote.installment, dec!(94559.60));
        assert_eq!(quote.total_repayment, dec!(1134715.16));
        assert_eq!(quote.total_interest, dec!(134715.16));
    }

    #[test]
    fn total_interest_is_repayment_minus_principal() {
        let quote = installment_quote(dec!(500000), dec!(10), 60, dec!(2500));
        assert_eq!(
            quote.total_interest,
            quote.total_repayment - dec!(500000)
        );
    }

    #[test]
    fn identical_inputs_yield_identical_quotes() {
        let a = installment_quote(dec!(750000), dec!(8.25), 48, dec!(1200));
        let b = installment_quote(dec!(750000), dec!(8.25), 48, dec!(1200));
        assert_eq!(a, b);
    }
}

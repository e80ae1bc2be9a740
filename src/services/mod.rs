//! Business logic services.
//!
//! `ledger` and `amortization` hold the real domain logic of the system;
//! `loans` wires the calculator into loan creation and updates.

pub mod amortization;
pub mod ledger;
pub mod loans;

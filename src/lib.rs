//! corebank — REST backend for a banking administration system.
//!
//! Catalog tables (cities, document/account/movement/branch types), branches,
//! account holders, accounts, account ownership, ledger movements and loans,
//! served over JSON/HTTP.
//!
//! The two pieces with real domain logic live under [`services`]:
//!
//! - the **ledger engine** (`services::ledger`) applies deposits, withdrawals
//!   and transfers atomically and writes the corresponding movement records;
//! - the **amortization calculator** (`services::amortization`) computes level
//!   monthly installments for loans.
//!
//! Everything else is storage-backed CRUD in the handlers.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

//! HTTP request handlers, one module per resource.

pub mod accounts;
pub mod branches;
pub mod catalogs;
pub mod health;
pub mod holders;
pub mod loans;
pub mod movements;
pub mod ownership;

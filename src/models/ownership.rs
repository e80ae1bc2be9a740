//! Account-ownership data models.
//!
//! Ownership is the many-to-many join between accounts and holders. It has
//! a composite identity (account id, holder id) and no attributes of its
//! own. Every account must keep at least one owner; the detach handler
//! enforces that.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the `account_owners` join table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AccountOwner {
    pub account_id: i64,
    pub holder_id: i64,
}

/// Request body for attaching a holder to an account.
#[derive(Debug, Deserialize)]
pub struct CreateOwnerRequest {
    pub account_id: i64,
    pub holder_id: i64,
}

/// Owner listing for one account, joined with holder details.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AccountOwnerDetail {
    pub account_id: i64,
    pub holder_id: i64,
    pub holder_name: String,
    pub holder_document: String,
    pub account_number: String,
}

/// Account listing for one holder, joined with account details.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct HolderAccountDetail {
    pub account_id: i64,
    pub holder_id: i64,
    pub account_number: String,
    pub balance: Decimal,
    pub holder_name: String,
}

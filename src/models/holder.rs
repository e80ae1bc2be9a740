//! Account-holder data models and API request/response types.

use serde::{Deserialize, Serialize};

/// Represents an account-holder record from the database.
///
/// Maps to the `holders` table. The `document` field is unique; the PIN is
/// an opaque string never returned to clients.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Holder {
    pub id: i64,
    pub name: String,
    pub document_type_id: i64,
    pub document: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub city_id: i64,
    pub pin: String,
}

/// Request body for creating an account holder.
#[derive(Debug, Deserialize)]
pub struct CreateHolderRequest {
    pub name: String,
    pub document_type_id: i64,
    pub document: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub city_id: i64,
    pub pin: String,
}

/// Request body for partially updating an account holder.
///
/// The document itself is not updatable; it identifies the person.
#[derive(Debug, Deserialize)]
pub struct UpdateHolderRequest {
    pub name: Option<String>,
    pub document_type_id: Option<i64>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub city_id: Option<i64>,
    pub pin: Option<String>,
}

/// Response body for holder endpoints.
///
/// Omits the PIN.
#[derive(Debug, Serialize)]
pub struct HolderResponse {
    pub id: i64,
    pub name: String,
    pub document_type_id: i64,
    pub document: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub city_id: i64,
}

/// Convert database Holder to API HolderResponse, dropping the PIN.
impl From<Holder> for HolderResponse {
    fn from(holder: Holder) -> Self {
        Self {
            id: holder.id,
            name: holder.name,
            document_type_id: holder.document_type_id,
            document: holder.document,
            address: holder.address,
            phone: holder.phone,
            city_id: holder.city_id,
        }
    }
}

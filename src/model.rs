//! Customer record and request payloads.

use serde::{Deserialize, Serialize};

/// One stored customer row.
#[derive(Serialize, Deserialize, sqlx::FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
}

/// Create payload: `name` is required, everything else optional.
#[derive(Deserialize, Clone, Debug)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
}

/// Full-update payload: absent fields clear the stored column. A replace
/// without a non-empty `name` fails validation, since stored names are
/// never null.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct CustomerReplace {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
}

/// Columns a client may write. `id` is never updatable.
pub const WRITABLE_COLUMNS: &[&str] = &["name", "phone", "email", "address", "district"];

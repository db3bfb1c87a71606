//! Supplier Model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Supplier entity (raw material vendor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create supplier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Update supplier payload (absent fields are left unchanged)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub is_active: Option<bool>,
}

impl Supplier {
    /// Build a new entity from a create payload
    pub fn create(input: SupplierCreate) -> Self {
        let now = crate::util::now_millis();
        Self {
            id: crate::util::snowflake_id(),
            name: input.name,
            phone: input.phone,
            address: input.address,
            note: input.note,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update payload in place
    pub fn apply_update(&mut self, update: SupplierUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = crate::util::now_millis();
    }
}

//! Delegate Model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Delegate entity (sales representative handling a set of customers)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delegate {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    /// Customers this delegate is responsible for
    #[serde(default)]
    pub customer_ids: Vec<i64>,
    pub note: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create delegate payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegateCreate {
    pub name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub customer_ids: Vec<i64>,
    pub note: Option<String>,
}

/// Update delegate payload (absent fields are left unchanged)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DelegateUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub customer_ids: Option<Vec<i64>>,
    pub note: Option<String>,
    pub is_active: Option<bool>,
}

impl Delegate {
    /// Build a new entity from a create payload
    pub fn create(input: DelegateCreate) -> Self {
        let now = crate::util::now_millis();
        Self {
            id: crate::util::snowflake_id(),
            name: input.name,
            phone: input.phone,
            customer_ids: input.customer_ids,
            note: input.note,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update payload in place
    pub fn apply_update(&mut self, update: DelegateUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(customer_ids) = update.customer_ids {
            self.customer_ids = customer_ids;
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

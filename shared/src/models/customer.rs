//! Customer Model

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Update customer payload (absent fields are left unchanged)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub is_active: Option<bool>,
}

impl Customer {
    /// Build a new entity from a create payload
    pub fn create(input: CustomerCreate) -> Self {
        let now = crate::util::now_millis();
        Self {
            id: crate::util::snowflake_id(),
            name: input.name,
            company: input.company,
            phone: input.phone,
            address: input.address,
            note: input.note,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update payload in place
    pub fn apply_update(&mut self, update: CustomerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(company) = update.company {
            self.company = Some(company);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sets_defaults() {
        let customer = Customer::create(CustomerCreate {
            name: "Sharq Press Trading".to_string(),
            company: None,
            phone: Some("0791112222".to_string()),
            address: None,
            note: None,
        });
        assert!(customer.id > 0);
        assert!(customer.is_active);
        assert_eq!(customer.created_at, customer.updated_at);
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut customer = Customer::create(CustomerCreate {
            name: "Old name".to_string(),
            company: Some("Old company".to_string()),
            phone: None,
            address: None,
            note: None,
        });
        customer.apply_update(CustomerUpdate {
            name: Some("New name".to_string()),
            is_active: Some(false),
            ..Default::default()
        });
        assert_eq!(customer.name, "New name");
        assert_eq!(customer.company.as_deref(), Some("Old company"));
        assert!(!customer.is_active);
    }
}

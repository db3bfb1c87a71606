//! Material Model
//!
//! Raw materials purchased from suppliers. A material carries a list of
//! dimensional variants (thickness/size combinations); the per-piece unit
//! price is derived from the package price, never entered directly.

use crate::types::Timestamp;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Material kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKind {
    #[default]
    Paper,
    Board,
    Foil,
    Ink,
    Other,
}

/// One purchasable variant of a material (a thickness/size combination)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialVariant {
    pub material_id: i64,
    /// Grammage or caliper, as labeled by the supplier (e.g. "300g")
    pub thickness: String,
    /// Sheet size label (e.g. "100x70")
    pub size: String,
    /// Sales unit (e.g. "sheet", "kg")
    pub unit: String,
    pub pieces_per_package: f64,
    pub package_price: f64,
    /// Derived: package_price / pieces_per_package, 2 decimals, 0 if the
    /// division is invalid. Refreshed on every create/update.
    #[serde(default)]
    pub unit_price: f64,
}

impl MaterialVariant {
    /// Per-piece price from the package price.
    ///
    /// Returns 0.0 when the divisor is non-positive or either input is
    /// non-finite; the quotation form shows 0 rather than erroring.
    pub fn derive_unit_price(package_price: f64, pieces_per_package: f64) -> f64 {
        if !pieces_per_package.is_finite() || pieces_per_package <= 0.0 {
            return 0.0;
        }
        let price = Decimal::from_f64(package_price).unwrap_or_default();
        let pieces = Decimal::from_f64(pieces_per_package).unwrap_or_default();
        if pieces.is_zero() {
            return 0.0;
        }
        (price / pieces)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_default()
    }

    /// Recompute `unit_price` from the current package fields
    pub fn refresh_unit_price(&mut self) {
        self.unit_price = Self::derive_unit_price(self.package_price, self.pieces_per_package);
    }
}

/// Material entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub kind: MaterialKind,
    pub supplier_id: Option<i64>,
    pub note: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub variants: Vec<MaterialVariant>,
}

/// Material variant input (for create/update, without material_id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialVariantInput {
    pub thickness: String,
    pub size: String,
    pub unit: String,
    pub pieces_per_package: f64,
    pub package_price: f64,
}

impl MaterialVariantInput {
    /// Build the stored variant, deriving the unit price
    pub fn into_variant(self, material_id: i64) -> MaterialVariant {
        let unit_price =
            MaterialVariant::derive_unit_price(self.package_price, self.pieces_per_package);
        MaterialVariant {
            material_id,
            thickness: self.thickness,
            size: self.size,
            unit: self.unit,
            pieces_per_package: self.pieces_per_package,
            package_price: self.package_price,
            unit_price,
        }
    }
}

/// Create material payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCreate {
    pub name: String,
    pub kind: MaterialKind,
    pub supplier_id: Option<i64>,
    pub note: Option<String>,
    #[serde(default)]
    pub variants: Vec<MaterialVariantInput>,
}

/// Update material payload (absent fields are left unchanged; a present
/// variant list replaces the whole list)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MaterialUpdate {
    pub name: Option<String>,
    pub kind: Option<MaterialKind>,
    pub supplier_id: Option<i64>,
    pub note: Option<String>,
    pub is_active: Option<bool>,
    pub variants: Option<Vec<MaterialVariantInput>>,
}

impl Material {
    /// Build a new entity from a create payload, deriving unit prices
    pub fn create(input: MaterialCreate) -> Self {
        let now = crate::util::now_millis();
        let id = crate::util::snowflake_id();
        Self {
            id,
            name: input.name,
            kind: input.kind,
            supplier_id: input.supplier_id,
            note: input.note,
            is_active: true,
            created_at: now,
            updated_at: now,
            variants: input
                .variants
                .into_iter()
                .map(|v| v.into_variant(id))
                .collect(),
        }
    }

    /// Apply an update payload in place, re-deriving variant unit prices
    pub fn apply_update(&mut self, update: MaterialUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(supplier_id) = update.supplier_id {
            self.supplier_id = Some(supplier_id);
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(variants) = update.variants {
            self.variants = variants
                .into_iter()
                .map(|v| v.into_variant(self.id))
                .collect();
        }
        self.updated_at = crate::util::now_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_derivation() {
        assert_eq!(MaterialVariant::derive_unit_price(120.0, 500.0), 0.24);
        assert_eq!(MaterialVariant::derive_unit_price(100.0, 3.0), 33.33);
    }

    #[test]
    fn test_unit_price_zero_pieces_per_package() {
        // Division by zero must not throw
        assert_eq!(MaterialVariant::derive_unit_price(120.0, 0.0), 0.0);
        assert_eq!(MaterialVariant::derive_unit_price(120.0, -5.0), 0.0);
    }

    #[test]
    fn test_unit_price_non_finite_inputs() {
        assert_eq!(MaterialVariant::derive_unit_price(f64::NAN, 10.0), 0.0);
        assert_eq!(MaterialVariant::derive_unit_price(120.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_variant_input_derives_price() {
        let input = MaterialVariantInput {
            thickness: "300g".to_string(),
            size: "100x70".to_string(),
            unit: "sheet".to_string(),
            pieces_per_package: 250.0,
            package_price: 180.0,
        };
        let variant = input.into_variant(42);
        assert_eq!(variant.material_id, 42);
        assert_eq!(variant.unit_price, 0.72);
    }

    #[test]
    fn test_create_derives_variant_prices() {
        let material = Material::create(MaterialCreate {
            name: "Couche paper".to_string(),
            kind: MaterialKind::Paper,
            supplier_id: Some(3),
            note: None,
            variants: vec![MaterialVariantInput {
                thickness: "170g".to_string(),
                size: "100x70".to_string(),
                unit: "sheet".to_string(),
                pieces_per_package: 500.0,
                package_price: 120.0,
            }],
        });
        assert_eq!(material.variants.len(), 1);
        assert_eq!(material.variants[0].unit_price, 0.24);
        assert_eq!(material.variants[0].material_id, material.id);
    }

    #[test]
    fn test_update_replaces_variants() {
        let mut material = Material::create(MaterialCreate {
            name: "Couche paper".to_string(),
            kind: MaterialKind::Paper,
            supplier_id: None,
            note: None,
            variants: vec![],
        });
        material.apply_update(MaterialUpdate {
            variants: Some(vec![MaterialVariantInput {
                thickness: "300g".to_string(),
                size: "50x70".to_string(),
                unit: "sheet".to_string(),
                pieces_per_package: 0.0,
                package_price: 120.0,
            }]),
            ..Default::default()
        });
        // Invalid divisor derives a zero unit price, not an error
        assert_eq!(material.variants[0].unit_price, 0.0);
    }

    #[test]
    fn test_refresh_unit_price() {
        let mut variant = MaterialVariant {
            material_id: 1,
            thickness: "250g".to_string(),
            size: "50x70".to_string(),
            unit: "sheet".to_string(),
            pieces_per_package: 100.0,
            package_price: 80.0,
            unit_price: 0.0,
        };
        variant.refresh_unit_price();
        assert_eq!(variant.unit_price, 0.8);
    }
}

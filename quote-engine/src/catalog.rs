//! External collaborator interfaces
//!
//! The engine is a pure computation library; the template/material
//! catalogs and quotation persistence live behind these traits so any
//! transport (HTTP handlers, a desktop shell, tests) can inject its own.
//! Lookups return data by value: the engine treats catalog reads as
//! point-in-time snapshots.
//!
//! The in-memory implementations back the test suite and serve as the
//! behavioral reference for real backends (id/code/timestamp assignment,
//! code collision re-roll).

use crate::config::EngineConfig;
use crate::pricing::recompute;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::box_template::BoxTemplate;
use shared::models::material::{Material, MaterialVariant};
use shared::quote::quotation::Quotation;
use shared::quote::step::{PaperParams, PaperSize};
use shared::types::UNSAVED_ID;
use shared::util::{generate_code, now_millis, snowflake_id};
use std::collections::HashMap;
use tracing::debug;

/// Box template lookup (by value, snapshot)
pub trait TemplateCatalog {
    fn box_template(&self, id: i64) -> AppResult<BoxTemplate>;
}

/// Material variant lookup
pub trait MaterialCatalog {
    fn material_variants(&self, material_id: i64) -> AppResult<Vec<MaterialVariant>>;
}

/// Quotation persistence
///
/// `save` assigns id, code, and timestamps on create and echoes the full
/// (recomputed) state back; `delete` returns the deleted id.
pub trait QuotationStore {
    fn get(&self, id: i64) -> AppResult<Quotation>;
    fn save(&mut self, quote: Quotation) -> AppResult<Quotation>;
    fn delete(&mut self, id: i64) -> AppResult<i64>;
}

// ==================== Helpers over the traits ====================

/// Build paper step parameters from a catalog material variant, copying
/// the variant's unit price by value (the quotation must not change when
/// the catalog price does).
pub fn paper_params_from_catalog(
    catalog: &impl MaterialCatalog,
    material_id: i64,
    variant_index: usize,
    paper_size: PaperSize,
) -> AppResult<PaperParams> {
    let variants = catalog.material_variants(material_id)?;
    let variant = variants.get(variant_index).ok_or_else(|| {
        AppError::new(ErrorCode::MaterialVariantNotFound)
            .with_detail("material_id", material_id)
            .with_detail("variant_index", variant_index as i64)
    })?;
    Ok(PaperParams {
        material_id,
        variant_index,
        unit_price: variant.unit_price,
        paper_size,
        ..Default::default()
    })
}

/// Snapshot a template out of the catalog into a fresh quotation.
///
/// The returned quotation is unsaved (id 0, no code) and carries the
/// config's default profit/VAT presets; run edits and save it through a
/// [`QuotationStore`].
pub fn new_quotation(
    catalog: &impl TemplateCatalog,
    config: &EngineConfig,
    customer_id: i64,
    template_id: i64,
    ordered_quantity: f64,
) -> AppResult<Quotation> {
    let template = catalog.box_template(template_id)?;
    let mut quote = Quotation {
        id: UNSAVED_ID,
        code: String::new(),
        customer_id,
        delegate_id: None,
        template,
        ordered_quantity: if ordered_quantity.is_finite() && ordered_quantity >= 0.0 {
            ordered_quantity
        } else {
            0.0
        },
        steps: vec![],
        subtotal: 0.0,
        profit_percent: config.default_profit_percent,
        vat_percent: config.default_vat_percent,
        discount_amount: 0.0,
        final_total: 0.0,
        note: None,
        created_at: 0,
        updated_at: 0,
    };
    recompute(&mut quote);
    Ok(quote)
}

// ==================== In-memory implementations ====================

/// In-memory template + material catalog
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    templates: HashMap<i64, BoxTemplate>,
    materials: HashMap<i64, Material>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_template(&mut self, template: BoxTemplate) {
        self.templates.insert(template.id, template);
    }

    pub fn insert_material(&mut self, material: Material) {
        self.materials.insert(material.id, material);
    }
}

impl TemplateCatalog for MemoryCatalog {
    fn box_template(&self, id: i64) -> AppResult<BoxTemplate> {
        self.templates
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::TemplateNotFound).with_detail("id", id))
    }
}

impl MaterialCatalog for MemoryCatalog {
    fn material_variants(&self, material_id: i64) -> AppResult<Vec<MaterialVariant>> {
        self.materials
            .get(&material_id)
            .map(|m| m.variants.clone())
            .ok_or_else(|| {
                AppError::new(ErrorCode::MaterialNotFound).with_detail("id", material_id)
            })
    }
}

/// Attempts at generating a non-colliding quotation code before giving up
const CODE_GENERATION_ATTEMPTS: usize = 16;

/// In-memory quotation store
#[derive(Debug)]
pub struct MemoryQuotationStore {
    config: EngineConfig,
    quotations: HashMap<i64, Quotation>,
}

impl MemoryQuotationStore {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            quotations: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.quotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotations.is_empty()
    }

    /// Generate a code not present among stored quotations
    fn unique_code(&self) -> AppResult<String> {
        for _ in 0..CODE_GENERATION_ATTEMPTS {
            let code = generate_code(&self.config.quote_code_prefix);
            if !self.quotations.values().any(|q| q.code == code) {
                return Ok(code);
            }
        }
        Err(AppError::new(ErrorCode::CodeCollision))
    }
}

impl QuotationStore for MemoryQuotationStore {
    fn get(&self, id: i64) -> AppResult<Quotation> {
        self.quotations
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::QuotationNotFound).with_detail("id", id))
    }

    fn save(&mut self, mut quote: Quotation) -> AppResult<Quotation> {
        let now = now_millis();
        if quote.id == UNSAVED_ID {
            quote.id = snowflake_id();
            quote.created_at = now;
        } else if !self.quotations.contains_key(&quote.id) {
            return Err(
                AppError::new(ErrorCode::QuotationNotFound).with_detail("id", quote.id)
            );
        }
        if quote.code.is_empty() {
            quote.code = self.unique_code()?;
        }
        quote.updated_at = now;

        // Persisted state always satisfies the derivation invariants
        recompute(&mut quote);

        debug!(id = quote.id, code = %quote.code, "quotation saved");
        self.quotations.insert(quote.id, quote.clone());
        Ok(quote)
    }

    fn delete(&mut self, id: i64) -> AppResult<i64> {
        self.quotations
            .remove(&id)
            .map(|_| id)
            .ok_or_else(|| AppError::new(ErrorCode::QuotationNotFound).with_detail("id", id))
    }
}

//! Quotation aggregate
//!
//! The top-level entity tying together a box template snapshot, the ordered
//! quantity, the configured production steps, and the computed financial
//! fields. A quotation owns its data: the template is copied by value and
//! the step list belongs to this quotation alone, so editing one quotation
//! can never touch another's numbers or the template catalog.

use crate::error::{AppError, AppResult};
use crate::models::box_template::BoxTemplate;
use crate::quote::step::{ProductionStep, StepParams};
use crate::types::{Timestamp, UNSAVED_ID};
use serde::{Deserialize, Serialize};

/// Quotation entity
///
/// `subtotal` and `final_total` are outputs of the engine's recompute;
/// everything else is operator input. The invariants:
/// `subtotal = Σ computed_cost` over steps, and `final_total` follows the
/// fixed profit → VAT → discount compounding order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quotation {
    pub id: i64,
    /// Human-facing code; generated at the persistence boundary if empty
    #[serde(default)]
    pub code: String,
    pub customer_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_id: Option<i64>,
    /// Template structure copied by value at creation/edit time
    pub template: BoxTemplate,
    pub ordered_quantity: f64,
    #[serde(default)]
    pub steps: Vec<ProductionStep>,

    // === Financial fields ===
    #[serde(default)]
    pub subtotal: f64,
    pub profit_percent: f64,
    pub vat_percent: f64,
    pub discount_amount: f64,
    #[serde(default)]
    pub final_total: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

/// Input contract for constructing a quotation before its first recompute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationInput {
    pub customer_id: i64,
    pub delegate_id: Option<i64>,
    pub template: BoxTemplate,
    pub ordered_quantity: f64,
    pub profit_percent: f64,
    pub vat_percent: f64,
    pub discount_amount: f64,
    #[serde(default)]
    pub steps: Vec<ProductionStep>,
    pub note: Option<String>,
    /// Optional pre-assigned code; left to the store when absent
    pub code: Option<String>,
}

impl Quotation {
    /// Build an unsaved quotation from a validated input.
    ///
    /// The store assigns id, code, and timestamps on first save; the engine
    /// fills the computed fields on the first recompute.
    pub fn from_input(input: QuotationInput) -> AppResult<Self> {
        validate_quotation_input(&input)?;
        Ok(Self {
            id: UNSAVED_ID,
            code: input.code.unwrap_or_default(),
            customer_id: input.customer_id,
            delegate_id: input.delegate_id,
            template: input.template,
            ordered_quantity: input.ordered_quantity,
            steps: input.steps,
            subtotal: 0.0,
            profit_percent: input.profit_percent,
            vat_percent: input.vat_percent,
            discount_amount: input.discount_amount,
            final_total: 0.0,
            note: input.note,
            created_at: 0,
            updated_at: 0,
        })
    }

    /// Find a step by instance id
    pub fn step(&self, step_id: &str) -> Option<&ProductionStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// Find a step by instance id, mutably
    pub fn step_mut(&mut self, step_id: &str) -> Option<&mut ProductionStep> {
        self.steps.iter_mut().find(|s| s.id == step_id)
    }
}

// ==================== Validation ====================

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{} must be a finite number, got {}",
            field, value
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that a f64 value is finite and non-negative
#[inline]
fn require_non_negative(value: f64, field: &str) -> AppResult<()> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got {}",
            field, value
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a quotation input before constructing the aggregate.
///
/// The engine itself coerces bad numbers to 0 mid-computation; this check
/// exists so interactive callers get field-level feedback at the boundary
/// instead of silently zeroed line items.
pub fn validate_quotation_input(input: &QuotationInput) -> AppResult<()> {
    require_non_negative(input.ordered_quantity, "ordered_quantity")?;
    require_finite(input.profit_percent, "profit_percent")?;
    require_finite(input.vat_percent, "vat_percent")?;
    require_non_negative(input.discount_amount, "discount_amount")?;
    for step in &input.steps {
        validate_step_params(&step.params)
            .map_err(|e| e.with_detail("step_id", step.id.clone()))?;
    }
    Ok(())
}

/// Validate one step's parameters against its kind's schema
pub fn validate_step_params(params: &StepParams) -> AppResult<()> {
    match params {
        StepParams::Paper(p) => {
            require_non_negative(p.unit_price, "unit_price")?;
            require_finite(p.ups_in_sheet, "ups_in_sheet")?;
            require_non_negative(p.destroy_rate, "destroy_rate")?;
            if let Some(q) = p.quantity_override {
                require_non_negative(q, "quantity_override")?;
            }
        }
        StepParams::Offset(p) => {
            for (face, label) in [(&p.front, "front"), (&p.back, "back")] {
                require_non_negative(
                    face.cost_first_thousand,
                    &format!("{}.cost_first_thousand", label),
                )?;
                require_non_negative(
                    face.cost_next_thousand,
                    &format!("{}.cost_next_thousand", label),
                )?;
            }
        }
        StepParams::HotFoil(p) => {
            require_non_negative(p.cost_per_print, "cost_per_print")?;
            require_non_negative(p.cliche_cost, "cliche_cost")?;
        }
        StepParams::Embossing(p) => {
            require_non_negative(p.cost_per_print, "cost_per_print")?;
            require_non_negative(p.cliche_cost, "cliche_cost")?;
        }
        StepParams::DieCut(p) => {
            require_non_negative(p.cost_first_thousand, "cost_first_thousand")?;
            require_non_negative(p.cost_next_thousand, "cost_next_thousand")?;
            require_non_negative(p.form_units, "form_units")?;
            require_non_negative(p.cost_per_form_unit, "cost_per_form_unit")?;
        }
        StepParams::Lamination(p) => {
            for (face, label) in [(&p.front, "front"), (&p.back, "back")] {
                require_non_negative(
                    face.cost_per_thousand,
                    &format!("{}.cost_per_thousand", label),
                )?;
            }
        }
        StepParams::Varnish(p) => {
            for (face, label) in [(&p.front, "front"), (&p.back, "back")] {
                require_non_negative(
                    face.cost_per_thousand,
                    &format!("{}.cost_per_thousand", label),
                )?;
            }
        }
        StepParams::SilkScreen(p) => {
            require_non_negative(p.cost_per_print, "cost_per_print")?;
        }
        StepParams::Finishing(p) => {
            for (item, label) in [
                (&p.plastic_window, "plastic_window"),
                (&p.pasting, "pasting"),
                (&p.cut, "cut"),
                (&p.binding, "binding"),
                (&p.packing, "packing"),
            ] {
                require_non_negative(item.cost, &format!("{}.cost", label))?;
                if let Some(q) = item.quantity_override {
                    require_non_negative(q, &format!("{}.quantity_override", label))?;
                }
            }
            require_non_negative(p.gum.points, "gum.points")?;
            require_non_negative(p.gum.point_cost, "gum.point_cost")?;
            if let Some(q) = p.gum.quantity_override {
                require_non_negative(q, "gum.quantity_override")?;
            }
            require_non_negative(p.delivery.total, "delivery.total")?;
        }
    }
    Ok(())
}

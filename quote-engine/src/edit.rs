//! Typed quotation edits
//!
//! Every legal mutation of a quotation is one [`QuoteEdit`] variant.
//! Applying an edit validates it, mutates the aggregate, and runs the full
//! recompute, so a quotation handed back to the caller is always
//! internally consistent. Mutation targets are checked by the type system
//! instead of addressed by string paths.

use crate::pricing::recompute;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::quote::quotation::Quotation;
use shared::quote::step::{PieceTarget, StepParams};
use shared::quote::validate_step_params;
use shared::util::now_millis;
use tracing::debug;

/// One committed operator edit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteEdit {
    SetOrderedQuantity { quantity: f64 },
    SetProfitPercent { percent: f64 },
    SetVatPercent { percent: f64 },
    SetDiscountAmount { amount: f64 },
    SetCustomer { customer_id: i64 },
    SetDelegate { delegate_id: Option<i64> },
    SetNote { note: Option<String> },
    /// Append a step (engine assigns the instance id)
    AddStep { target: PieceTarget, params: StepParams },
    RemoveStep { step_id: String },
    SetStepTarget { step_id: String, target: PieceTarget },
    /// Replace a step's parameters; the replacement must match the step's kind
    SetStepParams { step_id: String, params: StepParams },
}

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

fn step_not_found(step_id: &str) -> AppError {
    AppError::new(ErrorCode::StepNotFound).with_detail("step_id", step_id)
}

/// Apply one edit to the quotation and recompute all derived fields.
///
/// On error the quotation is unchanged; validation happens before any
/// mutation.
pub fn apply_edit(quote: &mut Quotation, edit: QuoteEdit) -> AppResult<()> {
    match edit {
        QuoteEdit::SetOrderedQuantity { quantity } => {
            require_non_negative(quantity, "ordered_quantity")?;
            quote.ordered_quantity = quantity;
        }
        QuoteEdit::SetProfitPercent { percent } => {
            require_finite(percent, "profit_percent")?;
            quote.profit_percent = percent;
        }
        QuoteEdit::SetVatPercent { percent } => {
            require_finite(percent, "vat_percent")?;
            quote.vat_percent = percent;
        }
        QuoteEdit::SetDiscountAmount { amount } => {
            require_non_negative(amount, "discount_amount")?;
            quote.discount_amount = amount;
        }
        QuoteEdit::SetCustomer { customer_id } => {
            quote.customer_id = customer_id;
        }
        QuoteEdit::SetDelegate { delegate_id } => {
            quote.delegate_id = delegate_id;
        }
        QuoteEdit::SetNote { note } => {
            quote.note = note;
        }
        QuoteEdit::AddStep { target, params } => {
            validate_step_params(&params)?;
            let step = shared::quote::step::ProductionStep::new(target, params);
            debug!(step_id = %step.id, kind = %step.kind(), "step added");
            quote.steps.push(step);
        }
        QuoteEdit::RemoveStep { step_id } => {
            let before = quote.steps.len();
            quote.steps.retain(|s| s.id != step_id);
            if quote.steps.len() == before {
                return Err(step_not_found(&step_id));
            }
        }
        QuoteEdit::SetStepTarget { step_id, target } => {
            let step = quote.step_mut(&step_id).ok_or_else(|| step_not_found(&step_id))?;
            step.target = target;
        }
        QuoteEdit::SetStepParams { step_id, params } => {
            validate_step_params(&params)?;
            let step = quote.step_mut(&step_id).ok_or_else(|| step_not_found(&step_id))?;
            if step.kind() != params.kind() {
                return Err(AppError::with_message(
                    ErrorCode::StepKindMismatch,
                    format!(
                        "step is {}, replacement parameters are {}",
                        step.kind(),
                        params.kind()
                    ),
                )
                .with_detail("step_id", step_id));
            }
            step.params = params;
        }
    }

    recompute(quote);
    quote.updated_at = now_millis();
    Ok(())
}

//! Quotation recompute
//!
//! The single entry point the caller runs after every committed edit.
//! Derivation order is fixed: quantities, then per-step costs, then the
//! financial tail — profit, VAT, discount — with each percentage addend
//! rounded to 2 decimals before compounding.
//!
//! Idempotent: recomputing an unchanged quotation writes the same values
//! back. There is no incremental path; operator-scale data (a handful of
//! steps) makes the full pass cheap enough to run on every keystroke
//! commit.

use crate::pricing::money::{round_money, to_decimal, to_f64};
use crate::pricing::quantity::propagate_quantities;
use crate::pricing::step_calculator::compute_step_cost;
use rust_decimal::Decimal;
use shared::quote::quotation::Quotation;
use tracing::debug;

/// Recompute every derived field of the quotation in place:
/// per-step quantities and costs, the subtotal, and the final total.
pub fn recompute(quote: &mut Quotation) {
    propagate_quantities(quote);

    let vat_percent = quote.vat_percent;
    let mut subtotal = Decimal::ZERO;
    for step in &mut quote.steps {
        compute_step_cost(step, vat_percent);
        subtotal += to_decimal(step.computed_cost);
    }
    quote.subtotal = to_f64(subtotal);

    // Financial tail over the rounded subtotal
    let subtotal = to_decimal(quote.subtotal);
    let profit = round_money(subtotal * to_decimal(quote.profit_percent) / Decimal::ONE_HUNDRED);
    let after_profit = subtotal + profit;
    let vat = round_money(after_profit * to_decimal(vat_percent) / Decimal::ONE_HUNDRED);
    let after_vat = after_profit + vat;
    let final_total = after_vat - to_decimal(quote.discount_amount);
    quote.final_total = to_f64(final_total);

    debug!(
        quotation = quote.id,
        subtotal = quote.subtotal,
        final_total = quote.final_total,
        steps = quote.steps.len(),
        "quotation recomputed"
    );
}

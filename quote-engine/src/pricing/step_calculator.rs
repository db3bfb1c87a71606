//! Per-step cost computation
//!
//! Each step kind maps to a closed-form cost formula over its computed
//! quantity. Inactive faces and sub-steps still get their cost computed
//! (the form shows it grayed out), but contribute 0 to the step total and
//! therefore to the quotation subtotal.

use crate::pricing::money::{round_money, tiered_thousands_cost, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::quote::step::{ProductionStep, StepParams};

/// Recompute `computed_cost` (and nested per-face / per-sub-step costs)
/// for one step. Quantities must already be propagated.
///
/// `vat_percent` is the owning quotation's VAT rate; the paper step's VAT
/// toggle charges it on that single step's cost.
pub fn compute_step_cost(step: &mut ProductionStep, vat_percent: f64) {
    let quantity = to_decimal(step.computed_quantity);
    let thousands = quantity / Decimal::ONE_THOUSAND;

    let cost = match &mut step.params {
        StepParams::Paper(p) => {
            let base = to_decimal(p.paper_total) * to_decimal(p.unit_price);
            if p.vat_active {
                base + round_money(base * to_decimal(vat_percent) / Decimal::ONE_HUNDRED)
            } else {
                base
            }
        }
        StepParams::Offset(p) => {
            let mut total = Decimal::ZERO;
            for face in [&mut p.front, &mut p.back] {
                let face_cost = tiered_thousands_cost(
                    face.computed_quantity,
                    face.cost_first_thousand,
                    face.cost_next_thousand,
                );
                face.computed_cost = to_f64(face_cost);
                if face.active {
                    total += to_decimal(face.computed_cost);
                }
            }
            total
        }
        StepParams::HotFoil(p) => {
            thousands * to_decimal(p.cost_per_print) * Decimal::from(p.number_of_colors)
                + to_decimal(p.cliche_cost)
        }
        StepParams::Embossing(p) => {
            thousands * to_decimal(p.cost_per_print) + to_decimal(p.cliche_cost)
        }
        StepParams::DieCut(p) => {
            let die_cost = tiered_thousands_cost(
                step.computed_quantity,
                p.cost_first_thousand,
                p.cost_next_thousand,
            );
            let form_cost = to_decimal(p.form_units) * to_decimal(p.cost_per_form_unit);
            die_cost + form_cost
        }
        StepParams::Lamination(p) => {
            let mut total = Decimal::ZERO;
            for face in [&mut p.front, &mut p.back] {
                let face_cost = to_decimal(face.computed_quantity) / Decimal::ONE_THOUSAND
                    * to_decimal(face.cost_per_thousand);
                face.computed_cost = to_f64(face_cost);
                if face.active {
                    total += to_decimal(face.computed_cost);
                }
            }
            total
        }
        StepParams::Varnish(p) => {
            let mut total = Decimal::ZERO;
            for face in [&mut p.front, &mut p.back] {
                let face_cost = to_decimal(face.computed_quantity) / Decimal::ONE_THOUSAND
                    * to_decimal(face.cost_per_thousand);
                face.computed_cost = to_f64(face_cost);
                if face.active {
                    total += to_decimal(face.computed_cost);
                }
            }
            total
        }
        StepParams::SilkScreen(p) => {
            thousands * to_decimal(p.cost_per_print) * Decimal::from(p.number_of_colors)
        }
        StepParams::Finishing(p) => {
            let mut total = Decimal::ZERO;

            // Per-unit sub-steps
            for item in [&mut p.plastic_window, &mut p.pasting, &mut p.packing] {
                let item_cost = to_decimal(item.computed_quantity) * to_decimal(item.cost);
                item.computed_cost = to_f64(item_cost);
                if item.active {
                    total += to_decimal(item.computed_cost);
                }
            }

            // Per-thousand sub-steps
            for item in [&mut p.cut, &mut p.binding] {
                let item_cost = to_decimal(item.computed_quantity) / Decimal::ONE_THOUSAND
                    * to_decimal(item.cost);
                item.computed_cost = to_f64(item_cost);
                if item.active {
                    total += to_decimal(item.computed_cost);
                }
            }

            // Gum: charged per glue point per unit
            let gum_cost = to_decimal(p.gum.computed_quantity)
                * to_decimal(p.gum.points)
                * to_decimal(p.gum.point_cost);
            p.gum.computed_cost = to_f64(gum_cost);
            if p.gum.active {
                total += to_decimal(p.gum.computed_cost);
            }

            // Delivery: flat entered total
            p.delivery.computed_cost = to_f64(to_decimal(p.delivery.total));
            if p.delivery.active {
                total += to_decimal(p.delivery.computed_cost);
            }

            total
        }
    };

    step.computed_cost = to_f64(cost);
}

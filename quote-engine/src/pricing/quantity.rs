//! Quantity propagation
//!
//! Derives every step's physical quantity from the quotation's ordered
//! quantity, the paper steps' sheet counts, and per-step paper-size
//! multipliers. Runs in three passes:
//!
//! 1. paper steps establish the sheet basis,
//! 2. sheet-basis steps (offset, hot foil, embossing, die-cut,
//!    silk-screen) and finishing sub-steps derive from it,
//! 3. lamination/varnish faces derive from the matching offset face's
//!    print count, falling back to the paper sheet basis.
//!
//! A step with no valid basis gets quantity 0 and never blocks the rest of
//! the pass.

use shared::quote::quotation::Quotation;
use shared::quote::step::{PieceTarget, ProductionStep, StepParams, TreatmentFace};
use tracing::debug;

/// Minimum offset press run: smaller jobs are still charged for 1000 prints
pub const MIN_PRESS_RUN: f64 = 1000.0;

/// Coerce a non-finite or negative quantity input to 0
#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Apply the minimum press run to a raw print count.
///
/// A zero basis stays zero: the floor charges small runs, it does not
/// invent prints for a step with nothing to print on.
#[inline]
fn press_run(raw: f64) -> f64 {
    if raw > 0.0 { raw.max(MIN_PRESS_RUN) } else { 0.0 }
}

/// Sheet basis provided by one paper step
struct PaperBasis {
    target: PieceTarget,
    sheets: f64,
}

/// Print counts provided by one offset step (per face, active faces only)
struct OffsetBasis {
    target: PieceTarget,
    front: Option<f64>,
    back: Option<f64>,
}

fn collect_paper_bases(steps: &[ProductionStep]) -> Vec<PaperBasis> {
    steps
        .iter()
        .filter_map(|step| match &step.params {
            StepParams::Paper(p) => Some(PaperBasis {
                target: step.target,
                sheets: p.sheets_quantity,
            }),
            _ => None,
        })
        .collect()
}

fn collect_offset_bases(steps: &[ProductionStep]) -> Vec<OffsetBasis> {
    steps
        .iter()
        .filter_map(|step| match &step.params {
            StepParams::Offset(p) => Some(OffsetBasis {
                target: step.target,
                front: p.front.active.then_some(p.front.computed_quantity),
                back: p.back.active.then_some(p.back.computed_quantity),
            }),
            _ => None,
        })
        .collect()
}

/// Sheets basis for a step: the piece-specific paper step wins over the
/// all-pieces paper step; no paper step at all means 0.
fn reference_sheets(bases: &[PaperBasis], target: PieceTarget) -> f64 {
    if let Some(basis) = bases.iter().find(|b| b.target == target) {
        return basis.sheets;
    }
    bases
        .iter()
        .find(|b| b.target == PieceTarget::AllPieces)
        .map(|b| b.sheets)
        .unwrap_or(0.0)
}

/// Offset basis for a step, same precedence as the paper lookup
fn reference_offset(bases: &[OffsetBasis], target: PieceTarget) -> Option<&OffsetBasis> {
    bases
        .iter()
        .find(|b| b.target == target)
        .or_else(|| bases.iter().find(|b| b.target == PieceTarget::AllPieces))
}

/// Quantity basis for one lamination/varnish face: the matching offset
/// face's print count when that face is active, else the paper sheet basis
/// under the treatment face's own paper size.
fn treatment_face_quantity(
    face: &TreatmentFace,
    offset_face: Option<f64>,
    sheets: f64,
) -> f64 {
    match offset_face {
        Some(prints) => prints,
        None => sheets * face.paper_size.multiplier(),
    }
}

/// Representative step-level quantity for a two-face step
fn representative_quantity(
    front_active: bool,
    front_quantity: f64,
    back_active: bool,
    back_quantity: f64,
) -> f64 {
    if front_active {
        front_quantity
    } else if back_active {
        back_quantity
    } else {
        0.0
    }
}

/// Recompute `computed_quantity` (and nested per-face / per-sub-step
/// quantities) for every step of the quotation.
pub fn propagate_quantities(quote: &mut Quotation) {
    let ordered = sanitize(quote.ordered_quantity);

    // Pass 1: paper steps establish the sheet basis everything else hangs off.
    for step in &mut quote.steps {
        if let StepParams::Paper(p) = &mut step.params {
            let quantity = sanitize(p.quantity_override.unwrap_or(ordered));
            let ups = if p.ups_in_sheet.is_finite() && p.ups_in_sheet > 0.0 {
                p.ups_in_sheet
            } else {
                1.0
            };
            p.sheets_quantity = (quantity / ups).round();
            p.paper_total = p.sheets_quantity + sanitize(p.destroy_rate);
            step.computed_quantity = p.sheets_quantity;
        }
    }
    let paper_bases = collect_paper_bases(&quote.steps);
    if paper_bases.is_empty() && !quote.steps.is_empty() {
        debug!("no paper step configured; sheet-basis steps fall back to 0");
    }

    // Pass 2: sheet-basis steps and finishing.
    for step in &mut quote.steps {
        let sheets = reference_sheets(&paper_bases, step.target);
        match &mut step.params {
            StepParams::Paper(_) => {}
            StepParams::Offset(p) => {
                for face in [&mut p.front, &mut p.back] {
                    face.computed_quantity = press_run(sheets * face.paper_size.multiplier());
                }
                step.computed_quantity = representative_quantity(
                    p.front.active,
                    p.front.computed_quantity,
                    p.back.active,
                    p.back.computed_quantity,
                );
            }
            StepParams::HotFoil(p) => {
                step.computed_quantity = sheets * p.paper_size.multiplier();
            }
            StepParams::Embossing(p) => {
                step.computed_quantity = sheets * p.paper_size.multiplier();
            }
            StepParams::DieCut(p) => {
                step.computed_quantity = sheets * p.paper_size.multiplier();
            }
            StepParams::SilkScreen(p) => {
                step.computed_quantity = sheets * p.paper_size.multiplier();
            }
            StepParams::Finishing(p) => {
                for item in [
                    &mut p.plastic_window,
                    &mut p.pasting,
                    &mut p.cut,
                    &mut p.binding,
                    &mut p.packing,
                ] {
                    item.computed_quantity = sanitize(item.quantity_override.unwrap_or(ordered));
                }
                p.gum.computed_quantity = sanitize(p.gum.quantity_override.unwrap_or(ordered));
                step.computed_quantity = ordered;
            }
            // Treatments need the offset print counts; handled in pass 3.
            StepParams::Lamination(_) | StepParams::Varnish(_) => {}
        }
    }
    let offset_bases = collect_offset_bases(&quote.steps);

    // Pass 3: lamination/varnish faces.
    for step in &mut quote.steps {
        let sheets = reference_sheets(&paper_bases, step.target);
        let offset = reference_offset(&offset_bases, step.target);
        match &mut step.params {
            StepParams::Lamination(p) => {
                p.front.computed_quantity = treatment_face_quantity(
                    &p.front,
                    offset.and_then(|o| o.front),
                    sheets,
                );
                p.back.computed_quantity =
                    treatment_face_quantity(&p.back, offset.and_then(|o| o.back), sheets);
                step.computed_quantity = representative_quantity(
                    p.front.active,
                    p.front.computed_quantity,
                    p.back.active,
                    p.back.computed_quantity,
                );
            }
            StepParams::Varnish(p) => {
                p.front.computed_quantity = treatment_face_quantity(
                    &p.front,
                    offset.and_then(|o| o.front),
                    sheets,
                );
                p.back.computed_quantity =
                    treatment_face_quantity(&p.back, offset.and_then(|o| o.back), sheets);
                step.computed_quantity = representative_quantity(
                    p.front.active,
                    p.front.computed_quantity,
                    p.back.active,
                    p.back.computed_quantity,
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::box_template::BoxTemplate;
    use shared::quote::step::{
        OffsetFace, OffsetParams, PaperParams, PaperSize, ProductionStep, SilkScreenParams,
    };

    fn quote_with_steps(ordered_quantity: f64, steps: Vec<ProductionStep>) -> Quotation {
        Quotation {
            id: 1,
            code: "QT00001".to_string(),
            customer_id: 1,
            delegate_id: None,
            template: BoxTemplate {
                id: 1,
                name: "Box".to_string(),
                code: "BT1".to_string(),
                pieces: vec![],
                created_at: 0,
                updated_at: 0,
            },
            ordered_quantity,
            steps,
            subtotal: 0.0,
            profit_percent: 0.0,
            vat_percent: 0.0,
            discount_amount: 0.0,
            final_total: 0.0,
            note: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn paper_step(target: PieceTarget, ups: f64, destroy: f64) -> ProductionStep {
        ProductionStep::new(
            target,
            StepParams::Paper(PaperParams {
                ups_in_sheet: ups,
                destroy_rate: destroy,
                ..Default::default()
            }),
        )
    }

    fn offset_step(target: PieceTarget, front_size: PaperSize) -> ProductionStep {
        ProductionStep::new(
            target,
            StepParams::Offset(OffsetParams {
                front: OffsetFace {
                    active: true,
                    paper_size: front_size,
                    ..Default::default()
                },
                back: OffsetFace::default(),
            }),
        )
    }

    #[test]
    fn test_paper_sheets_and_total() {
        let mut quote = quote_with_steps(
            1000.0,
            vec![paper_step(PieceTarget::AllPieces, 4.0, 50.0)],
        );
        propagate_quantities(&mut quote);
        let StepParams::Paper(p) = &quote.steps[0].params else {
            unreachable!()
        };
        assert_eq!(p.sheets_quantity, 250.0);
        assert_eq!(p.paper_total, 300.0);
        assert_eq!(quote.steps[0].computed_quantity, 250.0);
    }

    #[test]
    fn test_paper_zero_ups_treated_as_one() {
        let mut quote =
            quote_with_steps(800.0, vec![paper_step(PieceTarget::AllPieces, 0.0, 0.0)]);
        propagate_quantities(&mut quote);
        assert_eq!(quote.steps[0].computed_quantity, 800.0);
    }

    #[test]
    fn test_offset_floor_at_minimum_press_run() {
        let mut quote = quote_with_steps(
            10.0,
            vec![
                paper_step(PieceTarget::AllPieces, 1.0, 0.0),
                offset_step(PieceTarget::AllPieces, PaperSize::Full100x70),
            ],
        );
        propagate_quantities(&mut quote);
        // 10 sheets, multiplier 1 => raw 10, floored to the 1000 minimum
        assert_eq!(quote.steps[1].computed_quantity, 1000.0);
    }

    #[test]
    fn test_offset_no_paper_step_is_zero_not_floored() {
        let mut quote = quote_with_steps(
            1000.0,
            vec![offset_step(PieceTarget::AllPieces, PaperSize::Full100x70)],
        );
        propagate_quantities(&mut quote);
        assert_eq!(quote.steps[0].computed_quantity, 0.0);
    }

    #[test]
    fn test_paper_size_multiplier_applied() {
        let mut quote = quote_with_steps(
            4000.0,
            vec![
                paper_step(PieceTarget::AllPieces, 2.0, 0.0),
                ProductionStep::new(
                    PieceTarget::AllPieces,
                    StepParams::SilkScreen(SilkScreenParams {
                        paper_size: PaperSize::Half50x70,
                        ..Default::default()
                    }),
                ),
            ],
        );
        propagate_quantities(&mut quote);
        // 2000 sheets * multiplier 2 = 4000 prints
        assert_eq!(quote.steps[1].computed_quantity, 4000.0);
    }

    #[test]
    fn test_piece_specific_paper_wins_over_all_pieces() {
        let mut quote = quote_with_steps(
            1000.0,
            vec![
                paper_step(PieceTarget::AllPieces, 1.0, 0.0),
                paper_step(PieceTarget::Piece(7), 4.0, 0.0),
                offset_step(PieceTarget::Piece(7), PaperSize::Full100x70),
            ],
        );
        propagate_quantities(&mut quote);
        // Piece 7 paper: 1000/4 = 250 sheets, floored to 1000 prints
        let StepParams::Offset(p) = &quote.steps[2].params else {
            unreachable!()
        };
        assert_eq!(p.front.computed_quantity, 1000.0);
    }

    #[test]
    fn test_piece_falls_back_to_all_pieces_paper() {
        let mut quote = quote_with_steps(
            3000.0,
            vec![
                paper_step(PieceTarget::AllPieces, 1.0, 0.0),
                offset_step(PieceTarget::Piece(9), PaperSize::Full100x70),
            ],
        );
        propagate_quantities(&mut quote);
        assert_eq!(quote.steps[1].computed_quantity, 3000.0);
    }

    #[test]
    fn test_lamination_uses_offset_face_quantity() {
        use shared::quote::step::{LaminationParams, TreatmentFace};
        let mut quote = quote_with_steps(
            3000.0,
            vec![
                paper_step(PieceTarget::AllPieces, 1.0, 0.0),
                offset_step(PieceTarget::AllPieces, PaperSize::Half50x70),
                ProductionStep::new(
                    PieceTarget::AllPieces,
                    StepParams::Lamination(LaminationParams {
                        front: TreatmentFace {
                            active: true,
                            ..Default::default()
                        },
                        back: TreatmentFace::default(),
                    }),
                ),
            ],
        );
        propagate_quantities(&mut quote);
        // Offset front: 3000 sheets * 2 = 6000 prints; lamination follows it
        let StepParams::Lamination(p) = &quote.steps[2].params else {
            unreachable!()
        };
        assert_eq!(p.front.computed_quantity, 6000.0);
    }

    #[test]
    fn test_lamination_falls_back_to_paper_basis() {
        use shared::quote::step::{LaminationParams, TreatmentFace};
        let mut quote = quote_with_steps(
            2000.0,
            vec![
                paper_step(PieceTarget::AllPieces, 1.0, 0.0),
                ProductionStep::new(
                    PieceTarget::AllPieces,
                    StepParams::Lamination(LaminationParams {
                        front: TreatmentFace {
                            active: true,
                            paper_size: PaperSize::Quarter50x35,
                            ..Default::default()
                        },
                        back: TreatmentFace::default(),
                    }),
                ),
            ],
        );
        propagate_quantities(&mut quote);
        // No offset step: 2000 sheets * multiplier 4 = 8000
        let StepParams::Lamination(p) = &quote.steps[1].params else {
            unreachable!()
        };
        assert_eq!(p.front.computed_quantity, 8000.0);
    }

    #[test]
    fn test_finishing_defaults_to_ordered_quantity() {
        use shared::quote::step::{FinishingItem, FinishingParams};
        let mut quote = quote_with_steps(
            1500.0,
            vec![ProductionStep::new(
                PieceTarget::AllPieces,
                StepParams::Finishing(FinishingParams {
                    packing: FinishingItem {
                        active: true,
                        ..Default::default()
                    },
                    cut: FinishingItem {
                        active: true,
                        quantity_override: Some(500.0),
                        ..Default::default()
                    },
                    ..Default::default()
                }),
            )],
        );
        propagate_quantities(&mut quote);
        let StepParams::Finishing(p) = &quote.steps[0].params else {
            unreachable!()
        };
        assert_eq!(p.packing.computed_quantity, 1500.0);
        assert_eq!(p.cut.computed_quantity, 500.0);
        assert_eq!(p.gum.computed_quantity, 1500.0);
    }

    #[test]
    fn test_negative_ordered_quantity_coerced_to_zero() {
        let mut quote =
            quote_with_steps(-50.0, vec![paper_step(PieceTarget::AllPieces, 1.0, 0.0)]);
        propagate_quantities(&mut quote);
        assert_eq!(quote.steps[0].computed_quantity, 0.0);
    }
}

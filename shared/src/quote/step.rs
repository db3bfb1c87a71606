//! Production step types
//!
//! A quotation is priced as an ordered list of production steps ("blocks"):
//! paper purchase, offset printing, hot foil, embossing, die-cut & form,
//! lamination, varnish, silk-screen, and finishing. Each step carries typed
//! parameters for its kind plus computed quantity/cost fields written by the
//! engine on every recompute.
//!
//! Computed fields are never edited directly; they are derivable from the
//! parameters, sibling steps' computed quantities, and the owning
//! quotation's ordered quantity.

use serde::{Deserialize, Serialize};

// ============================================================================
// Step kind / paper size / target
// ============================================================================

/// Production step kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Paper,
    Offset,
    HotFoil,
    Embossing,
    DieCut,
    Lamination,
    Varnish,
    SilkScreen,
    Finishing,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Paper => "paper",
            Self::Offset => "offset",
            Self::HotFoil => "hot foil",
            Self::Embossing => "embossing",
            Self::DieCut => "die-cut",
            Self::Lamination => "lamination",
            Self::Varnish => "varnish",
            Self::SilkScreen => "silk-screen",
            Self::Finishing => "finishing",
        };
        write!(f, "{}", name)
    }
}

/// Press sheet sizes, in centimeters
///
/// The multiplier is the board layout yield per 100x70 master sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaperSize {
    #[default]
    #[serde(rename = "100X70")]
    Full100x70,
    #[serde(rename = "50X70")]
    Half50x70,
    #[serde(rename = "50X35")]
    Quarter50x35,
}

impl PaperSize {
    /// Sheets cut from one 100x70 master sheet
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Full100x70 => 1.0,
            Self::Half50x70 => 2.0,
            Self::Quarter50x35 => 4.0,
        }
    }
}

/// Which piece of the box template a step applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "scope", content = "piece_id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceTarget {
    /// The step covers every piece of the template
    #[default]
    AllPieces,
    /// The step covers one specific piece
    Piece(i64),
}

// ============================================================================
// Per-kind parameters
// ============================================================================

/// Paper purchase step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaperParams {
    /// Material catalog reference
    pub material_id: i64,
    /// Index into the material's variant list chosen by the operator
    pub variant_index: usize,
    /// Unit price copied from the selected variant at selection time
    pub unit_price: f64,
    pub paper_size: PaperSize,
    /// Product units imposed per press sheet
    pub ups_in_sheet: f64,
    /// Waste allowance, in sheets (added to the sheet count as-is)
    pub destroy_rate: f64,
    /// Charge VAT on this step's cost (quotation's VAT rate)
    pub vat_active: bool,
    /// Operator override of the quantity basis; defaults to the
    /// quotation's ordered quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_override: Option<f64>,

    // === Computed fields ===
    /// round(quantity / ups_in_sheet)
    #[serde(default)]
    pub sheets_quantity: f64,
    /// sheets_quantity + destroy_rate (sheets actually purchased)
    #[serde(default)]
    pub paper_total: f64,
}

impl Default for PaperParams {
    fn default() -> Self {
        Self {
            material_id: 0,
            variant_index: 0,
            unit_price: 0.0,
            paper_size: PaperSize::default(),
            ups_in_sheet: 1.0,
            destroy_rate: 0.0,
            vat_active: false,
            quantity_override: None,
            sheets_quantity: 0.0,
            paper_total: 0.0,
        }
    }
}

/// One printable face (front/back) of an offset step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OffsetFace {
    pub active: bool,
    pub paper_size: PaperSize,
    /// Setup-inclusive price for the first run of up to 1000 prints
    pub cost_first_thousand: f64,
    /// Marginal rate per additional thousand prints
    pub cost_next_thousand: f64,

    // === Computed fields ===
    /// Print count for this face (minimum press run applied)
    #[serde(default)]
    pub computed_quantity: f64,
    #[serde(default)]
    pub computed_cost: f64,
}

/// Offset printing step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OffsetParams {
    pub front: OffsetFace,
    pub back: OffsetFace,
}

/// Hot foil stamping step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotFoilParams {
    pub paper_size: PaperSize,
    pub cost_per_print: f64,
    pub number_of_colors: u32,
    /// Flat cost of the stamping cliche
    pub cliche_cost: f64,
}

impl Default for HotFoilParams {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::default(),
            cost_per_print: 0.0,
            number_of_colors: 1,
            cliche_cost: 0.0,
        }
    }
}

/// Embossing step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EmbossingParams {
    pub paper_size: PaperSize,
    pub cost_per_print: f64,
    /// Flat cost of the embossing cliche
    pub cliche_cost: f64,
}

/// Die-cut & form step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DieCutParams {
    pub paper_size: PaperSize,
    pub cost_first_thousand: f64,
    pub cost_next_thousand: f64,
    /// Number of cutting-form units to build
    pub form_units: f64,
    pub cost_per_form_unit: f64,
}

/// One treated face (front/back) of a lamination or varnish step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TreatmentFace {
    pub active: bool,
    /// Used when the face falls back to the paper sheet basis; a face fed
    /// by an offset step takes that step's print count directly
    pub paper_size: PaperSize,
    pub cost_per_thousand: f64,

    // === Computed fields ===
    #[serde(default)]
    pub computed_quantity: f64,
    #[serde(default)]
    pub computed_cost: f64,
}

/// Lamination step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LaminationParams {
    pub front: TreatmentFace,
    pub back: TreatmentFace,
}

/// Varnish step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VarnishParams {
    pub front: TreatmentFace,
    pub back: TreatmentFace,
}

/// Silk-screen printing step parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SilkScreenParams {
    pub paper_size: PaperSize,
    pub cost_per_print: f64,
    pub number_of_colors: u32,
}

impl Default for SilkScreenParams {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::default(),
            cost_per_print: 0.0,
            number_of_colors: 1,
        }
    }
}

/// Generic finishing sub-step: a quantity and a cost rate
///
/// Whether the rate applies per unit or per thousand depends on the
/// sub-step (cut and binding are per thousand, the rest per unit).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FinishingItem {
    pub active: bool,
    /// Operator override; defaults to the quotation's ordered quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_override: Option<f64>,
    pub cost: f64,

    // === Computed fields ===
    #[serde(default)]
    pub computed_quantity: f64,
    #[serde(default)]
    pub computed_cost: f64,
}

/// Gum application sub-step: charged per glue point per unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GumItem {
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_override: Option<f64>,
    /// Glue points per unit
    pub points: f64,
    pub point_cost: f64,

    // === Computed fields ===
    #[serde(default)]
    pub computed_quantity: f64,
    #[serde(default)]
    pub computed_cost: f64,
}

/// Delivery sub-step: a flat entered total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeliveryItem {
    pub active: bool,
    pub total: f64,

    // === Computed fields ===
    #[serde(default)]
    pub computed_cost: f64,
}

/// Finishing step parameters (sub-steps, each independently activated)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FinishingParams {
    pub plastic_window: FinishingItem,
    pub gum: GumItem,
    pub pasting: FinishingItem,
    pub cut: FinishingItem,
    pub binding: FinishingItem,
    pub packing: FinishingItem,
    pub delivery: DeliveryItem,
}

// ============================================================================
// Step
// ============================================================================

/// Typed step parameters, one variant per step kind
///
/// Replaces a stringly-typed parameter map: a parameter edit that does not
/// fit the step's kind fails at the type level, not at recompute time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "step_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepParams {
    Paper(PaperParams),
    Offset(OffsetParams),
    HotFoil(HotFoilParams),
    Embossing(EmbossingParams),
    DieCut(DieCutParams),
    Lamination(LaminationParams),
    Varnish(VarnishParams),
    SilkScreen(SilkScreenParams),
    Finishing(FinishingParams),
}

impl StepParams {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Paper(_) => StepKind::Paper,
            Self::Offset(_) => StepKind::Offset,
            Self::HotFoil(_) => StepKind::HotFoil,
            Self::Embossing(_) => StepKind::Embossing,
            Self::DieCut(_) => StepKind::DieCut,
            Self::Lamination(_) => StepKind::Lamination,
            Self::Varnish(_) => StepKind::Varnish,
            Self::SilkScreen(_) => StepKind::SilkScreen,
            Self::Finishing(_) => StepKind::Finishing,
        }
    }
}

/// One configured production step attached to a quotation
///
/// Steps are an ordered sequence; order has no computational effect but is
/// preserved for display and round-trips through serialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionStep {
    /// Step instance id (UUID, client- or engine-generated)
    pub id: String,
    pub target: PieceTarget,
    #[serde(flatten)]
    pub params: StepParams,

    // === Computed fields ===
    #[serde(default)]
    pub computed_quantity: f64,
    #[serde(default)]
    pub computed_cost: f64,
}

impl ProductionStep {
    /// Create a step with a fresh instance id and zeroed computed fields
    pub fn new(target: PieceTarget, params: StepParams) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            target,
            params,
            computed_quantity: 0.0,
            computed_cost: 0.0,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.params.kind()
    }
}

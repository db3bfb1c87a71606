//! Quotation aggregate and production step types

pub mod quotation;
pub mod step;

pub use quotation::{Quotation, QuotationInput, validate_quotation_input, validate_step_params};
pub use step::{
    DeliveryItem, DieCutParams, EmbossingParams, FinishingItem, FinishingParams, GumItem,
    HotFoilParams, LaminationParams, OffsetFace, OffsetParams, PaperParams, PaperSize,
    PieceTarget, ProductionStep, SilkScreenParams, StepKind, StepParams, TreatmentFace,
    VarnishParams,
};

//! Ration formulation
//!
//! Weighted blending, Pearson square, standard comparison and batch planning.

pub mod batch;
pub mod compare;
pub mod error;
pub mod formulator;
pub mod pearson;
pub mod ration;
pub mod rounding;

pub use batch::{BatchLine, BatchPlan};
pub use compare::{ComplianceStatus, FieldCheck, StandardComparison};
pub use error::{FormulationResult, RationError};
pub use formulator::RationFormulator;
pub use pearson::{PearsonShare, PearsonSolution};
pub use ration::{
    formulate, IngredientContribution, RationCost, RationItem, RationResult, ResolvedLine,
    SUM_TOLERANCE,
};

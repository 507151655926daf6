// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Dreux-Gorisse Mix Design Core
// Aggregate grading, reference curve and cubic-meter batching
//

pub mod design;
pub mod dreux_kernel;
pub mod error;
pub mod formulas;
pub mod science;
#[cfg(test)]
pub mod tests_design;

// Re-export core types
pub use design::{MixDesign, AGGREGATE_PALETTE, MAX_AGGREGATES};
pub use dreux_kernel::{DesignReport, DreuxConfig, DreuxKernel, Severity, ValidationEvent};
pub use error::{DesignError, Result};
pub use science::formulation::{FormulationEngine, FormulationResult};
pub use science::grading::GradingEngine;
pub use science::materials::{
    Aggregate, AggregateId, FormulationParams, SieveReading, SlumpClass, VibrationLevel,
};
pub use science::reference::ReferenceCurveEngine;

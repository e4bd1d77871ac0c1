//! Pipeline module for orchestrating terrain generation stages.
//!
//! Provides a trait-based architecture for stages that each take ownership
//! of the geometry, transform it, and hand it on to the next stage.

mod stage;

pub use stage::{
    FaultStage, GenerationStage, NormalStage, NormalizationStage, Pipeline, StageId,
    TesselationStage,
};

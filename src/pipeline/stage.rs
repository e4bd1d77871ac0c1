//! Generation stage trait and pipeline orchestration.

use rand::RngCore;
use tracing::{debug, info};

use crate::config::TerrainConfig;
use crate::faults::apply_faults;
use crate::geometry::Geometry;
use crate::terrain::{estimate_normals, normalize_heights, tesselate, TerrainError};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Triangle index generation.
    Tesselation,
    /// Random fault displacement.
    Faults,
    /// Height rescaling into a fixed span.
    Normalization,
    /// Vertex normal estimation.
    Normals,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Tesselation => "tesselation",
            StageId::Faults => "faults",
            StageId::Normalization => "normalization",
            StageId::Normals => "normals",
        }
    }
}

/// Trait for implementing generation stages.
///
/// A stage receives the geometry by value and returns it transformed; it
/// keeps no reference to the geometry afterwards.
pub trait GenerationStage {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage.
    ///
    /// # Arguments
    /// * `geometry` - The geometry to transform
    /// * `rng` - Random source for stochastic stages
    fn execute(&self, geometry: Geometry, rng: &mut dyn RngCore) -> Result<Geometry, TerrainError>;
}

/// Orchestrates generation stages into a complete pipeline.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the full pipeline: tesselation, faults, normalization, normals.
    pub fn standard(config: &TerrainConfig) -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(TesselationStage)
            .add_stage(FaultStage::new(config.fault_count))
            .add_stage(NormalizationStage::new(config.height_span))
            .add_stage(NormalStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order.
    pub fn run(&self, geometry: Geometry, rng: &mut dyn RngCore) -> Result<Geometry, TerrainError> {
        self.run_with_callbacks(
            geometry,
            rng,
            |name, i, total| debug!(stage = name, "[{}/{}] starting", i + 1, total),
            |name, i, total| debug!(stage = name, "[{}/{}] completed", i + 1, total),
        )
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `geometry` - The geometry to transform
    /// * `rng` - Random source handed to every stage
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        mut geometry: Geometry,
        rng: &mut dyn RngCore,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<Geometry, TerrainError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(TerrainError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            on_stage_start(stage.name(), i, total);

            geometry = stage.execute(geometry, rng)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        info!(
            vertices = geometry.vertex_count(),
            triangles = geometry.triangle_count(),
            stages = total,
            "pipeline finished"
        );
        Ok(geometry)
    }
}

/// Connects the vertex lattice into triangles.
pub struct TesselationStage;

impl GenerationStage for TesselationStage {
    fn id(&self) -> StageId {
        StageId::Tesselation
    }

    fn name(&self) -> &str {
        "Tesselation"
    }

    fn execute(&self, geometry: Geometry, _rng: &mut dyn RngCore) -> Result<Geometry, TerrainError> {
        Ok(tesselate(geometry))
    }
}

/// Applies random half-plane faults.
pub struct FaultStage {
    pub count: usize,
}

impl FaultStage {
    /// Creates a fault stage applying `count` faults.
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl GenerationStage for FaultStage {
    fn id(&self) -> StageId {
        StageId::Faults
    }

    fn name(&self) -> &str {
        "Fault Simulation"
    }

    fn execute(&self, geometry: Geometry, rng: &mut dyn RngCore) -> Result<Geometry, TerrainError> {
        Ok(apply_faults(geometry, self.count, rng))
    }
}

/// Rescales heights into a fixed span.
pub struct NormalizationStage {
    pub span: f32,
}

impl NormalizationStage {
    /// Creates a normalization stage with the given total height span.
    pub fn new(span: f32) -> Self {
        Self { span }
    }
}

impl GenerationStage for NormalizationStage {
    fn id(&self) -> StageId {
        StageId::Normalization
    }

    fn name(&self) -> &str {
        "Height Normalization"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Faults]
    }

    fn execute(&self, geometry: Geometry, _rng: &mut dyn RngCore) -> Result<Geometry, TerrainError> {
        Ok(normalize_heights(geometry, self.span))
    }
}

/// Estimates per-vertex normals; must run once heights are final.
pub struct NormalStage;

impl GenerationStage for NormalStage {
    fn id(&self) -> StageId {
        StageId::Normals
    }

    fn name(&self) -> &str {
        "Normal Estimation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Tesselation, StageId::Normalization]
    }

    fn execute(&self, geometry: Geometry, _rng: &mut dyn RngCore) -> Result<Geometry, TerrainError> {
        Ok(estimate_normals(geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::build_grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_standard_pipeline() {
        let config = TerrainConfig {
            grid_size: 8,
            fault_count: 20,
            ..Default::default()
        };
        let pipeline = Pipeline::standard(&config);
        assert_eq!(pipeline.stage_count(), 4);

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let geometry = pipeline.run(build_grid(8).unwrap(), &mut rng).unwrap();
        assert_eq!(geometry.triangle_count(), 2 * 7 * 7);
        assert_eq!(geometry.normals().unwrap().len(), 64);
    }

    #[test]
    fn test_missing_dependency() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(NormalStage);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = pipeline.run(build_grid(3).unwrap(), &mut rng).unwrap_err();
        assert_eq!(
            err,
            TerrainError::MissingDependency("Normal Estimation".to_string(), "tesselation".to_string())
        );
    }

    #[test]
    fn test_unmet_dependency_skips_start_callback() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(TesselationStage);
        pipeline.add_stage(NormalizationStage::new(0.8));
        let mut started = Vec::new();
        let mut finished = Vec::new();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = pipeline
            .run_with_callbacks(
                build_grid(2).unwrap(),
                &mut rng,
                |name, _, _| started.push(name.to_string()),
                |name, _, _| finished.push(name.to_string()),
            )
            .unwrap_err();

        assert!(matches!(err, TerrainError::MissingDependency(..)));
        assert_eq!(started, vec!["Tesselation"]);
        assert_eq!(finished, vec!["Tesselation"]);
    }

    #[test]
    fn test_callbacks_fire_in_order() {
        let pipeline = Pipeline::standard(&TerrainConfig::default());
        let mut started = Vec::new();
        let mut finished = 0;

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        pipeline
            .run_with_callbacks(
                build_grid(2).unwrap(),
                &mut rng,
                |name, _, _| started.push(name.to_string()),
                |_, _, _| finished += 1,
            )
            .unwrap();

        assert_eq!(
            started,
            vec!["Tesselation", "Fault Simulation", "Height Normalization", "Normal Estimation"]
        );
        assert_eq!(finished, 4);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(StageId::Faults.name(), "faults");
        assert_eq!(StageId::Normals.name(), "normals");
    }
}

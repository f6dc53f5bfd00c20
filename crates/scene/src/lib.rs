//! Scenes: the static geometry and per-frame instances each demo variant draws.
//!
//! # Invariants
//! - Geometry is static; only instance transforms and colours change per frame.
//! - The simulation grid assigns a time-varying value per cell. There is no physics.

mod mesh;
mod scene;
mod simulation;

pub use mesh::{Instance, Mesh, Vertex};
pub use scene::{
    CubeGrid, MAX_GRID_CELLS, Scene, SceneConfig, SceneError, SimulationGrid, SpinningTriangle,
};
pub use simulation::Simulation;

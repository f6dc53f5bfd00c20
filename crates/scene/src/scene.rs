use fluids_math::{Axis, Matrix4f};
use serde::{Deserialize, Serialize};

use crate::mesh::{Instance, Mesh};
use crate::simulation::Simulation;

/// Upper bound on instances a grid scene may produce.
pub const MAX_GRID_CELLS: usize = 32_768;

const TRIANGLE_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Errors from building a scene out of its config.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("grid of {n}^3 cells exceeds the limit of {max}")]
    GridTooLarge { n: usize, max: usize },
    #[error("spacing must be positive and finite, got {0}")]
    InvalidSpacing(f32),
}

fn default_rate() -> f32 {
    1.0
}

fn default_cube_grid_size() -> usize {
    3
}

fn default_cube_spacing() -> f32 {
    1.0
}

fn default_simulation_size() -> usize {
    8
}

fn default_simulation_spacing() -> f32 {
    0.25
}

/// Which demo to run and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneConfig {
    Triangle {
        #[serde(default = "default_rate")]
        rate: f32,
    },
    CubeGrid {
        #[serde(default = "default_cube_grid_size")]
        n: usize,
        #[serde(default = "default_cube_spacing")]
        spacing: f32,
        #[serde(default = "default_rate")]
        spin_rate: f32,
    },
    Simulation {
        #[serde(default = "default_simulation_size")]
        n: usize,
        #[serde(default = "default_simulation_spacing")]
        spacing: f32,
    },
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig::Triangle {
            rate: default_rate(),
        }
    }
}

impl SceneConfig {
    pub fn triangle() -> Self {
        Self::default()
    }

    pub fn cube_grid() -> Self {
        SceneConfig::CubeGrid {
            n: default_cube_grid_size(),
            spacing: default_cube_spacing(),
            spin_rate: default_rate(),
        }
    }

    pub fn simulation() -> Self {
        SceneConfig::Simulation {
            n: default_simulation_size(),
            spacing: default_simulation_spacing(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SceneConfig::Triangle { .. } => "triangle",
            SceneConfig::CubeGrid { .. } => "cube_grid",
            SceneConfig::Simulation { .. } => "simulation",
        }
    }
}

fn validate_grid(n: usize, spacing: f32) -> Result<(), SceneError> {
    if n == 0 {
        return Err(SceneError::EmptyGrid);
    }
    let cells = n.saturating_mul(n).saturating_mul(n);
    if cells > MAX_GRID_CELLS {
        return Err(SceneError::GridTooLarge {
            n,
            max: MAX_GRID_CELLS,
        });
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(SceneError::InvalidSpacing(spacing));
    }
    Ok(())
}

/// Offset of cell `i` along one axis so the grid is centred on the origin.
fn centred(i: usize, n: usize, spacing: f32) -> f32 {
    (i as f32 - (n as f32 - 1.0) / 2.0) * spacing
}

/// A single triangle rotating about Z.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinningTriangle {
    /// Radians per second.
    pub rate: f32,
}

impl SpinningTriangle {
    pub fn instance(&self, time: f32) -> Instance {
        Instance::new(Matrix4f::rotation(self.rate * time, Axis::Z), TRIANGLE_COLOR)
    }
}

/// `n`³ cubes centred on the origin, each spinning in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGrid {
    pub n: usize,
    pub spacing: f32,
    /// Radians per second about Y; X turns at half this rate.
    pub spin_rate: f32,
}

impl CubeGrid {
    /// Half extent of each cube: a quarter of the spacing, leaving gaps.
    pub fn cube_half_size(&self) -> f32 {
        self.spacing * 0.25
    }

    pub fn instances(&self, time: f32) -> Vec<Instance> {
        let n = self.n;
        let spin = Matrix4f::rotation(self.spin_rate * time, Axis::Y)
            .multiply(&Matrix4f::rotation(self.spin_rate * time * 0.5, Axis::X));
        let denom = (n.max(2) - 1) as f32;

        let mut out = Vec::with_capacity(n * n * n);
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let model = Matrix4f::translation(
                        centred(i, n, self.spacing),
                        centred(j, n, self.spacing),
                        centred(k, n, self.spacing),
                    )
                    .multiply(&spin);
                    let color = [
                        0.2 + 0.8 * i as f32 / denom,
                        0.2 + 0.8 * j as f32 / denom,
                        0.2 + 0.8 * k as f32 / denom,
                        1.0,
                    ];
                    out.push(Instance::new(model, color));
                }
            }
        }
        out
    }
}

/// The simulation cells drawn as a grid of grey cubes.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationGrid {
    pub simulation: Simulation,
    pub spacing: f32,
}

impl SimulationGrid {
    pub fn cube_half_size(&self) -> f32 {
        self.spacing * 0.4
    }

    /// Grey level for a cell value: `0.5 + value`, clamped to [0, 1].
    pub fn shade(value: f32) -> f32 {
        (0.5 + value).clamp(0.0, 1.0)
    }

    pub fn instances(&self) -> Vec<Instance> {
        let n = self.simulation.size();
        self.simulation
            .iter()
            .map(|(i, j, k, value)| {
                let model = Matrix4f::translation(
                    centred(i, n, self.spacing),
                    centred(j, n, self.spacing),
                    centred(k, n, self.spacing),
                );
                let g = Self::shade(value);
                Instance::new(model, [g, g, g, 1.0])
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Variant {
    Triangle(SpinningTriangle),
    CubeGrid(CubeGrid),
    Simulation(SimulationGrid),
}

/// One demo variant: a static mesh plus instances that change with time.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    variant: Variant,
    mesh: Mesh,
    time: f32,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        let (variant, mesh) = match *config {
            SceneConfig::Triangle { rate } => {
                (Variant::Triangle(SpinningTriangle { rate }), Mesh::triangle())
            }
            SceneConfig::CubeGrid {
                n,
                spacing,
                spin_rate,
            } => {
                validate_grid(n, spacing)?;
                let grid = CubeGrid {
                    n,
                    spacing,
                    spin_rate,
                };
                let mesh = Mesh::cube(grid.cube_half_size());
                (Variant::CubeGrid(grid), mesh)
            }
            SceneConfig::Simulation { n, spacing } => {
                validate_grid(n, spacing)?;
                let grid = SimulationGrid {
                    simulation: Simulation::new(n).ok_or(SceneError::GridTooLarge {
                        n,
                        max: MAX_GRID_CELLS,
                    })?,
                    spacing,
                };
                let mesh = Mesh::cube(grid.cube_half_size());
                (Variant::Simulation(grid), mesh)
            }
        };
        tracing::debug!(
            scene = config.name(),
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "scene built"
        );
        Ok(Self {
            variant,
            mesh,
            time: 0.0,
        })
    }

    pub fn name(&self) -> &'static str {
        match self.variant {
            Variant::Triangle(_) => "triangle",
            Variant::CubeGrid(_) => "cube_grid",
            Variant::Simulation(_) => "simulation",
        }
    }

    /// Advance to absolute `time` in seconds.
    pub fn update(&mut self, time: f32) {
        self.time = time;
        if let Variant::Simulation(grid) = &mut self.variant {
            grid.simulation.update(time);
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn instances(&self) -> Vec<Instance> {
        match &self.variant {
            Variant::Triangle(tri) => vec![tri.instance(self.time)],
            Variant::CubeGrid(grid) => grid.instances(self.time),
            Variant::Simulation(grid) => grid.instances(),
        }
    }

    /// The simulation state, if this is the simulation variant.
    pub fn simulation(&self) -> Option<&Simulation> {
        match &self.variant {
            Variant::Simulation(grid) => Some(&grid.simulation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_config_is_triangle() {
        let scene = Scene::from_config(&SceneConfig::default()).unwrap();
        assert_eq!(scene.name(), "triangle");
        assert_eq!(scene.mesh(), &Mesh::triangle());
        assert_eq!(scene.instances().len(), 1);
    }

    #[test]
    fn triangle_spins_about_z() {
        let mut scene = Scene::from_config(&SceneConfig::Triangle { rate: 2.0 }).unwrap();
        scene.update(0.25);
        let inst = scene.instances()[0];
        assert!(inst.model.approx_eq(&Matrix4f::rotation(0.5, Axis::Z), EPS));
        assert_eq!(inst.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn cube_grid_is_centred() {
        let scene = Scene::from_config(&SceneConfig::CubeGrid {
            n: 3,
            spacing: 2.0,
            spin_rate: 1.0,
        })
        .unwrap();
        let instances = scene.instances();
        assert_eq!(instances.len(), 27);

        // At time 0 the spin is identity, so the model is a pure translation.
        let first = instances[0].model;
        assert!(first.approx_eq(&Matrix4f::translation(-2.0, -2.0, -2.0), EPS));
        let middle = instances[13].model;
        assert!(middle.approx_eq(&Matrix4f::identity(), EPS));

        let sum: f32 = instances.iter().map(|i| i.model.data[0][3]).sum();
        assert!(sum.abs() < EPS);
    }

    #[test]
    fn cube_grid_of_one_sits_at_origin() {
        let grid = CubeGrid {
            n: 1,
            spacing: 1.0,
            spin_rate: 1.0,
        };
        let instances = grid.instances(0.0);
        assert_eq!(instances.len(), 1);
        assert!(instances[0].model.approx_eq(&Matrix4f::identity(), EPS));
        assert!(instances[0].color.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn cube_grid_spins_with_time() {
        let grid = CubeGrid {
            n: 2,
            spacing: 1.0,
            spin_rate: 1.0,
        };
        let a = grid.instances(0.0);
        let b = grid.instances(1.0);
        assert!(!a[0].model.approx_eq(&b[0].model, EPS));
        // Translation column is unaffected by the spin.
        assert_eq!(a[0].model.data[0][3], b[0].model.data[0][3]);
    }

    #[test]
    fn simulation_colours_follow_time() {
        let mut scene = Scene::from_config(&SceneConfig::Simulation {
            n: 2,
            spacing: 1.0,
        })
        .unwrap();

        // Before any update every cell is 1.0, which clamps to white.
        assert!(scene.instances().iter().all(|i| i.color[0] == 1.0));

        scene.update(0.0);
        assert!(scene.instances().iter().all(|i| i.color[0] == 1.0));

        scene.update(std::f32::consts::PI);
        assert!(scene.instances().iter().all(|i| i.color[0].abs() < 1e-5));

        let sim = scene.simulation().unwrap();
        assert!((sim.value(1, 1, 1).unwrap() + 0.5).abs() < 1e-5);
    }

    #[test]
    fn shade_clamps() {
        assert_eq!(SimulationGrid::shade(1.0), 1.0);
        assert_eq!(SimulationGrid::shade(-2.0), 0.0);
        assert_eq!(SimulationGrid::shade(0.0), 0.5);
    }

    #[test]
    fn rejects_empty_grid() {
        let err = Scene::from_config(&SceneConfig::CubeGrid {
            n: 0,
            spacing: 1.0,
            spin_rate: 1.0,
        })
        .unwrap_err();
        assert_eq!(err, SceneError::EmptyGrid);
    }

    #[test]
    fn rejects_bad_spacing_and_huge_grids() {
        assert_eq!(
            Scene::from_config(&SceneConfig::Simulation { n: 2, spacing: 0.0 }).unwrap_err(),
            SceneError::InvalidSpacing(0.0)
        );
        assert!(matches!(
            Scene::from_config(&SceneConfig::Simulation {
                n: 100,
                spacing: 1.0
            }),
            Err(SceneError::GridTooLarge { n: 100, .. })
        ));
    }

    #[test]
    fn config_from_yaml_uses_defaults() {
        let config: SceneConfig = serde_yaml::from_str("kind: cube_grid\nn: 4\n").unwrap();
        assert_eq!(
            config,
            SceneConfig::CubeGrid {
                n: 4,
                spacing: 1.0,
                spin_rate: 1.0
            }
        );

        let sim: SceneConfig = serde_yaml::from_str("kind: simulation\n").unwrap();
        assert_eq!(sim, SceneConfig::simulation());
    }

    #[test]
    fn scene_mesh_scales_with_spacing() {
        let scene = Scene::from_config(&SceneConfig::CubeGrid {
            n: 2,
            spacing: 4.0,
            spin_rate: 0.0,
        })
        .unwrap();
        assert_eq!(scene.mesh(), &Mesh::cube(1.0));
    }
}

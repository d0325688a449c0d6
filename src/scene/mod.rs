//! Scene state: cube instances and the point cloud.
//!
//! Both collections are replaced wholesale; there is no partial-update
//! path. A generation counter bumps on every mutation so the renderer can
//! skip GPU uploads for frames where nothing changed.

pub mod prepared;
pub mod producer;

use glam::Vec3;

pub use prepared::PreparedFrame;
pub use producer::{SceneProducer, SceneUpdate};

use crate::error::CubeviewError;

/// One cube's full transform/appearance record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeInstance {
    /// Center position in world space.
    pub position: Vec3,
    /// Full extents per axis, halved at draw time.
    pub size: Vec3,
    /// Rotation in degrees per axis, applied X then Y then Z.
    pub rotation: Vec3,
    /// Wireframe color, each channel nominally in [0, 1] (not validated).
    pub color: [f32; 3],
}

/// Owned cube and point collections with wholesale replacement semantics.
pub struct SceneBuffers {
    cubes: Vec<CubeInstance>,
    points: Vec<Vec3>,
    generation: u64,
}

impl Default for SceneBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuffers {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cubes: Vec::new(),
            points: Vec::new(),
            generation: 0,
        }
    }

    /// Replace all cubes from four parallel attribute sequences.
    ///
    /// Values are stored exactly as given; colors and rotations are not
    /// range-checked.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::ShapeMismatch`] if the sequences have
    /// unequal lengths. The previous cube buffer is left untouched.
    pub fn set_cubes(
        &mut self,
        positions: &[Vec3],
        sizes: &[Vec3],
        rotations: &[Vec3],
        colors: &[[f32; 3]],
    ) -> Result<(), CubeviewError> {
        let n = positions.len();
        if sizes.len() != n || rotations.len() != n || colors.len() != n {
            return Err(CubeviewError::ShapeMismatch {
                positions: n,
                sizes: sizes.len(),
                rotations: rotations.len(),
                colors: colors.len(),
            });
        }

        self.cubes = (0..n)
            .map(|i| CubeInstance {
                position: positions[i],
                size: sizes[i],
                rotation: rotations[i],
                color: colors[i],
            })
            .collect();
        self.generation += 1;
        Ok(())
    }

    /// Replace all cubes with an already-built instance list.
    pub fn replace_cubes(&mut self, cubes: Vec<CubeInstance>) {
        self.cubes = cubes;
        self.generation += 1;
    }

    /// Replace the point cloud.
    pub fn set_points(&mut self, points: Vec<Vec3>) {
        self.points = points;
        self.generation += 1;
    }

    /// Append a cube at the origin with the given extents and color.
    ///
    /// This is the explicit spawn hook behind the middle-click gesture; the
    /// scene itself never inspects mouse state.
    pub fn spawn_cube_at_origin(&mut self, size: Vec3, color: [f32; 3]) {
        self.cubes.push(CubeInstance {
            position: Vec3::ZERO,
            size,
            rotation: Vec3::ZERO,
            color,
        });
        self.generation += 1;
    }

    /// The current cube instances, in render order.
    #[must_use]
    pub fn cubes(&self) -> &[CubeInstance] {
        &self.cubes
    }

    /// The current point positions.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Monotonic counter incremented by every mutation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cubes_stores_inputs_exactly() {
        let mut scene = SceneBuffers::new();
        scene
            .set_cubes(
                &[Vec3::new(1.0, 2.0, 3.0)],
                &[Vec3::new(2.0, 4.0, 6.0)],
                &[Vec3::new(90.0, 0.0, 45.0)],
                &[[0.25, 0.5, 0.75]],
            )
            .unwrap();

        assert_eq!(scene.cubes().len(), 1);
        let cube = scene.cubes()[0];
        assert_eq!(cube.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cube.size, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(cube.rotation, Vec3::new(90.0, 0.0, 45.0));
        assert_eq!(cube.color, [0.25, 0.5, 0.75]);
    }

    #[test]
    fn mismatched_lengths_are_rejected_and_leave_buffers_unchanged() {
        let mut scene = SceneBuffers::new();
        scene
            .set_cubes(
                &[Vec3::ZERO],
                &[Vec3::ONE],
                &[Vec3::ZERO],
                &[[1.0, 1.0, 1.0]],
            )
            .unwrap();
        let generation_before = scene.generation();

        let result = scene.set_cubes(
            &[Vec3::ZERO, Vec3::ONE],
            &[Vec3::ONE],
            &[Vec3::ZERO, Vec3::ZERO],
            &[[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]],
        );

        assert!(matches!(
            result,
            Err(CubeviewError::ShapeMismatch {
                positions: 2,
                sizes: 1,
                rotations: 2,
                colors: 2,
            })
        ));
        assert_eq!(scene.cubes().len(), 1);
        assert_eq!(scene.generation(), generation_before);
    }

    #[test]
    fn set_points_replaces_wholesale() {
        let mut scene = SceneBuffers::new();
        scene.set_points(vec![Vec3::ONE, Vec3::ZERO]);
        assert_eq!(scene.points().len(), 2);

        scene.set_points(vec![Vec3::new(5.0, 5.0, 5.0)]);
        assert_eq!(scene.points(), &[Vec3::new(5.0, 5.0, 5.0)]);
    }

    #[test]
    fn spawn_appends_at_origin() {
        let mut scene = SceneBuffers::new();
        scene.spawn_cube_at_origin(Vec3::splat(2.0), [0.0, 1.0, 1.0]);
        scene.spawn_cube_at_origin(Vec3::splat(2.0), [0.0, 1.0, 1.0]);

        assert_eq!(scene.cubes().len(), 2);
        assert_eq!(scene.cubes()[1].position, Vec3::ZERO);
        assert_eq!(scene.cubes()[1].rotation, Vec3::ZERO);
    }

    #[test]
    fn every_mutation_bumps_generation() {
        let mut scene = SceneBuffers::new();
        assert_eq!(scene.generation(), 0);

        scene.set_points(Vec::new());
        assert_eq!(scene.generation(), 1);

        scene.replace_cubes(Vec::new());
        assert_eq!(scene.generation(), 2);

        scene.spawn_cube_at_origin(Vec3::ONE, [1.0, 0.0, 0.0]);
        assert_eq!(scene.generation(), 3);
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rigid shapes: the data every scene object carries.
//!
//! A [`RigidShape`] is the unit the physics step works on. Its collision
//! volume is always the axis-aligned box `scale` wide centered on
//! `position`, whatever its [`ShapeKind`] looks like on screen.

use crate::aabb::Aabb;
use glam::{Mat4, Vec3};

/// Geometry family of a shape, used by the renderer to pick a mesh
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Unit cube
    Cube,
    /// UV sphere
    Sphere {
        /// Radius in local units
        radius: f32,
    },
    /// Y-aligned cylinder
    Cylinder {
        /// Radius in local units
        radius: f32,
        /// Height in local units
        height: f32,
    },
    /// Flat quad on the XZ plane
    Plane,
    /// Imported model
    Mesh {
        /// Asset path the renderer loads the mesh from
        source: String,
    },
    /// Animated water surface
    Water {
        /// Extent along X
        width: f32,
        /// Extent along Z
        depth: f32,
        /// Grid vertices per side
        resolution: u32,
    },
}

impl ShapeKind {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Sphere { .. } => "sphere",
            ShapeKind::Cylinder { .. } => "cylinder",
            ShapeKind::Plane => "plane",
            ShapeKind::Mesh { .. } => "mesh",
            ShapeKind::Water { .. } => "water",
        }
    }
}

/// A scene object with position, velocity and an AABB collision volume
#[derive(Debug, Clone, PartialEq)]
pub struct RigidShape {
    /// Geometry used for drawing
    pub kind: ShapeKind,
    /// World-space center
    pub position: Vec3,
    /// Units per second
    pub velocity: Vec3,
    /// Full size along each axis; also the collision box size
    pub scale: Vec3,
    /// Euler angles in degrees, applied X then Y then Z. Visual only.
    pub rotation: Vec3,
    /// Base color handed to the renderer
    pub color: Vec3,
    /// Optional material or texture tag
    pub material: Option<String>,
    /// Accumulate world gravity into `velocity.y`
    pub use_gravity: bool,
    /// Never integrated, still collides
    pub is_static: bool,
    /// Takes part in pairwise checks, as prober and as target
    pub has_collision: bool,
}

impl RigidShape {
    /// Create a shape at the origin with unit scale, collision on and no gravity
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            color: Vec3::ONE,
            material: None,
            use_gravity: false,
            is_static: false,
            has_collision: true,
        }
    }

    /// Unit cube
    pub fn cube() -> Self {
        Self::new(ShapeKind::Cube)
    }

    /// Sphere whose collision box encloses it
    pub fn sphere(radius: f32) -> Self {
        Self::new(ShapeKind::Sphere { radius }).with_scale(Vec3::splat(radius * 2.0))
    }

    /// Flat plane
    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane)
    }

    /// Builder: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Builder: set material tag
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Builder: toggle gravity
    pub fn with_gravity(mut self, use_gravity: bool) -> Self {
        self.use_gravity = use_gravity;
        self
    }

    /// Builder: mark static
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Builder: toggle collision
    pub fn with_collision(mut self, has_collision: bool) -> Self {
        self.has_collision = has_collision;
        self
    }

    /// Move the shape
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Resize the shape (and its collision box)
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Accumulate `angle` degrees of rotation around each axis weighted by `axis`
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.rotation += axis * angle;
    }

    /// Current collision box
    pub fn aabb(&self) -> Aabb {
        Aabb::from_scale(self.position, self.scale)
    }

    /// Collision box this shape would have if it were centered at `position`
    pub fn aabb_at(&self, position: Vec3) -> Aabb {
        Aabb::from_scale(position, self.scale)
    }

    /// Closed-interval AABB overlap against another shape.
    ///
    /// Reports overlap only; no depth or normal is computed. Flags are not
    /// consulted here, callers filter on `has_collision`.
    pub fn check_collision(&self, other: &RigidShape) -> bool {
        self.aabb().overlaps(&other.aabb())
    }

    /// Model transform: translate, rotate X/Y/Z, then scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_scale(self.scale)
    }

    /// True if the physics step integrates this shape
    pub fn is_dynamic(&self) -> bool {
        !self.is_static
    }
}

impl Default for RigidShape {
    fn default() -> Self {
        Self::cube()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let shape = RigidShape::cube();
        assert_eq!(shape.scale, Vec3::ONE);
        assert!(shape.has_collision);
        assert!(!shape.use_gravity);
        assert!(shape.is_dynamic());
        assert_eq!(shape.color, Vec3::ONE);
    }

    #[test]
    fn test_check_collision_symmetric() {
        let floor = RigidShape::plane()
            .with_position(Vec3::new(0.0, -2.5, 0.0))
            .with_scale(Vec3::new(40.0, 0.1, 40.0));
        let cube = RigidShape::cube().with_position(Vec3::new(0.5, -2.0, 0.0));
        let far = RigidShape::cube().with_position(Vec3::new(0.5, 5.0, 0.0));

        assert!(cube.check_collision(&floor));
        assert!(floor.check_collision(&cube));
        assert!(!far.check_collision(&floor));
        assert!(!floor.check_collision(&far));
    }

    #[test]
    fn test_rotation_is_not_collision_relevant() {
        let mut a = RigidShape::cube();
        let b = RigidShape::cube().with_position(Vec3::new(1.2, 0.0, 0.0));
        assert!(!a.check_collision(&b));

        a.rotate(45.0, Vec3::Y);
        assert!(!a.check_collision(&b));
        assert_eq!(a.aabb(), RigidShape::cube().aabb());
    }

    #[test]
    fn test_sphere_box_encloses_radius() {
        let sphere = RigidShape::sphere(1.0);
        assert_eq!(sphere.scale, Vec3::splat(2.0));
        assert_eq!(sphere.aabb().half_extents, Vec3::ONE);
    }

    #[test]
    fn test_model_matrix_translates_and_scales() {
        let shape = RigidShape::cube()
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::new(2.0, 4.0, 6.0));

        let corner = shape.model_matrix().transform_point3(Vec3::splat(0.5));
        assert!(corner.abs_diff_eq(Vec3::new(2.0, 4.0, 6.0), 1e-5));
    }
}

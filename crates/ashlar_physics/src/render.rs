// SPDX-License-Identifier: MIT OR Apache-2.0
//! Renderer seam.
//!
//! Scenes never talk to a graphics API. They hand a [`Renderer`] flat lists
//! of [`DrawItem`]s, one list per [`RenderPass`], and the renderer matches
//! on [`ShapeKind`] to pick the mesh.

use crate::arena::ShapeHandle;
use crate::shape::{RigidShape, ShapeKind};
use glam::{Mat4, Vec3};

/// Which pass a batch of draw items belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Depth-only pass from the light
    Shadow,
    /// Main lit pass
    Lit,
    /// Unlit light source markers
    Lamp,
}

/// One shape to draw
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    /// Arena handle, `None` for scene-owned decorations like the lamp
    pub handle: Option<ShapeHandle>,
    /// Geometry family
    pub kind: &'a ShapeKind,
    /// Model transform
    pub model: Mat4,
    /// Base color
    pub color: Vec3,
    /// Material or texture tag
    pub material: Option<&'a str>,
}

impl<'a> DrawItem<'a> {
    /// Draw item for a shape
    pub fn from_shape(handle: Option<ShapeHandle>, shape: &'a RigidShape) -> Self {
        Self {
            handle,
            kind: &shape.kind,
            model: shape.model_matrix(),
            color: shape.color,
            material: shape.material.as_deref(),
        }
    }
}

/// Per-frame light and view parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLighting {
    /// Light position
    pub light_position: Vec3,
    /// Camera eye position
    pub view_position: Vec3,
    /// Route the lit pass through the post-processing target
    pub post_processing: bool,
}

/// Something that can draw scene shapes
pub trait Renderer {
    /// Called once per frame before any pass
    fn begin_frame(&mut self, lighting: &FrameLighting);

    /// Draw a batch of items in one pass
    fn draw(&mut self, pass: RenderPass, items: &[DrawItem<'_>]);

    /// Called once per frame after all passes
    fn end_frame(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_item_from_shape() {
        let shape = RigidShape::sphere(1.0)
            .with_position(Vec3::new(2.5, 1.0, 2.0))
            .with_color(Vec3::new(1.0, 0.0, 0.0))
            .with_material("glossy");

        let item = DrawItem::from_shape(None, &shape);
        assert_eq!(item.kind, &ShapeKind::Sphere { radius: 1.0 });
        assert_eq!(item.material, Some("glossy"));
        assert_eq!(item.color, Vec3::X);
        assert!(item
            .model
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(shape.position, 1e-6));
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static showcase scene with an orbiting lamp.
//!
//! Nothing here moves except the light: a floor, a sphere, a textured cube
//! and an imported mesh sit still while the lamp traces
//! `x = 1 + 2 sin t`, `z = sin(t / 2)` at a fixed height.

use crate::frame::FrameContext;
use crate::input::Action;
use crate::render::{DrawItem, FrameLighting, RenderPass, Renderer};
use crate::scene::{Scene, SceneError, SceneResult};
use crate::shape::{RigidShape, ShapeKind};
use crate::world::PhysicsWorld;
use glam::Vec3;

/// Lamp position right after load
const LAMP_START: Vec3 = Vec3::new(1.2, 1.0, 2.0);

/// Lamp position after `elapsed` seconds
pub fn lamp_position(elapsed: f32) -> Vec3 {
    Vec3::new(1.0 + elapsed.sin() * 2.0, LAMP_START.y, (elapsed / 2.0).sin())
}

/// A few static props lit by a moving lamp
pub struct ShowcaseScene {
    world: PhysicsWorld,
    lamp: RigidShape,
    elapsed: f32,
    view_position: Vec3,
    loaded: bool,
}

impl ShowcaseScene {
    /// Create an unloaded scene
    pub fn new() -> Self {
        Self {
            world: PhysicsWorld::default(),
            lamp: RigidShape::cube()
                .with_position(LAMP_START)
                .with_scale(Vec3::splat(0.2))
                .with_collision(false)
                .with_static(true),
            elapsed: 0.0,
            view_position: Vec3::ZERO,
            loaded: false,
        }
    }

    /// The props
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Seconds since the last load
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Current lamp position
    pub fn light_position(&self) -> Vec3 {
        self.lamp.position
    }
}

impl Default for ShowcaseScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ShowcaseScene {
    fn name(&self) -> &'static str {
        "showcase"
    }

    fn load(&mut self) -> SceneResult<()> {
        self.world.clear();
        self.elapsed = 0.0;
        self.lamp.position = LAMP_START;

        self.world.insert(
            RigidShape::plane()
                .with_position(Vec3::new(0.0, -1.0, 0.0))
                .with_color(Vec3::splat(0.5))
                .with_static(true),
        );
        self.world.insert(
            RigidShape::sphere(1.0)
                .with_position(Vec3::new(-1.5, 0.0, -2.0))
                .with_color(Vec3::new(1.0, 0.0, 0.0))
                .with_static(true),
        );
        self.world.insert(
            RigidShape::cube()
                .with_position(Vec3::new(1.5, 0.0, 0.0))
                .with_material("wood")
                .with_static(true),
        );
        self.world.insert(
            RigidShape::new(ShapeKind::Mesh {
                source: "assets/models/car.obj".to_owned(),
            })
            .with_position(Vec3::new(0.0, -1.1, 0.0))
            .with_scale(Vec3::splat(0.001))
            .with_color(Vec3::new(1.0, 0.0, 1.0))
            .with_static(true),
        );

        self.loaded = true;
        tracing::info!(
            "Loaded scene '{}' with {} shapes",
            self.name(),
            self.world.shapes().len()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameContext) -> SceneResult<()> {
        if !self.loaded {
            return Err(SceneError::NotLoaded(self.name()));
        }

        if ctx.input.is_pressed(Action::ReloadScene) {
            return self.load();
        }

        self.elapsed += ctx.dt;
        self.lamp.position = lamp_position(self.elapsed);
        self.view_position = ctx.camera.position;
        Ok(())
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        let items: Vec<DrawItem<'_>> = self
            .world
            .shapes()
            .iter()
            .map(|(handle, shape)| DrawItem::from_shape(Some(handle), shape))
            .collect();

        renderer.begin_frame(&FrameLighting {
            light_position: self.lamp.position,
            view_position: self.view_position,
            post_processing: false,
        });
        renderer.draw(RenderPass::Lit, &items);
        renderer.draw(RenderPass::Lamp, &[DrawItem::from_shape(None, &self.lamp)]);
        renderer.end_frame();
    }

    fn log_summary(&self) {
        tracing::info!(
            "Showcase ran {:.2}s, lamp at {:?}",
            self.elapsed,
            self.lamp.position
        );
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Physics world: shape integration, rollback collision and the player.
//!
//! Each [`PhysicsWorld::step`] walks the shapes in slot order. A dynamic
//! shape gets gravity, moves by `velocity * dt`, and if its new box touches
//! any other collidable shape the whole move is undone and its velocity
//! zeroed. Shapes resolve one after another, so a later shape sees the
//! already-committed positions of earlier ones.
//!
//! The player is not a member of the arena: shapes never collide with it,
//! it collides with them.

use crate::arena::{ShapeArena, ShapeHandle};
use crate::config::{PlayerSettings, WorldSettings};
use crate::frame::FrameContext;
use crate::input::Action;
use crate::player::PlayerController;
use crate::shape::RigidShape;
use glam::Vec3;

/// Shapes, the player and world constants
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    shapes: ShapeArena,
    player: Option<PlayerController>,
    settings: WorldSettings,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new(settings: WorldSettings) -> Self {
        tracing::info!(
            "Physics world initialized (gravity {}, kill floor {})",
            settings.gravity,
            settings.kill_floor_y
        );

        Self {
            shapes: ShapeArena::new(),
            player: None,
            settings,
        }
    }

    /// World constants
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Replace world constants
    pub fn set_settings(&mut self, settings: WorldSettings) {
        self.settings = settings;
    }

    /// Add a shape
    pub fn insert(&mut self, shape: RigidShape) -> ShapeHandle {
        self.shapes.insert(shape)
    }

    /// Look up a shape
    pub fn get(&self, handle: ShapeHandle) -> Option<&RigidShape> {
        self.shapes.get(handle)
    }

    /// Look up a shape mutably
    pub fn get_mut(&mut self, handle: ShapeHandle) -> Option<&mut RigidShape> {
        self.shapes.get_mut(handle)
    }

    /// All shapes
    pub fn shapes(&self) -> &ShapeArena {
        &self.shapes
    }

    /// All shapes, mutably
    pub fn shapes_mut(&mut self) -> &mut ShapeArena {
        &mut self.shapes
    }

    /// Remove every shape and the player. Old handles stop resolving.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.player = None;
    }

    /// Create the player at its spawn point, replacing any previous one
    pub fn spawn_player(&mut self, settings: PlayerSettings) -> &mut PlayerController {
        tracing::debug!("Spawning player at {:?}", settings.spawn_point);
        self.player.insert(PlayerController::new(settings))
    }

    /// The player, if spawned
    pub fn player(&self) -> Option<&PlayerController> {
        self.player.as_ref()
    }

    /// The player, mutably
    pub fn player_mut(&mut self) -> Option<&mut PlayerController> {
        self.player.as_mut()
    }

    /// Advance every dynamic shape by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        for handle in self.shapes.handles() {
            let Some(shape) = self.shapes.get(handle) else {
                continue;
            };
            if shape.is_static {
                continue;
            }

            let mut velocity = shape.velocity;
            if shape.use_gravity {
                velocity.y = (velocity.y + self.settings.gravity * dt)
                    .max(self.settings.terminal_velocity);
            }

            let before = shape.position;
            let mut position = before + velocity * dt;

            if shape.has_collision {
                let moved = shape.aabb_at(position);
                let blocked = self.shapes.iter().any(|(other_handle, other)| {
                    other_handle != handle && other.has_collision && moved.overlaps(&other.aabb())
                });

                if blocked {
                    position = before;
                    velocity = Vec3::ZERO;
                }
            }

            let fell = position.y < self.settings.kill_floor_y;
            if fell {
                position = self.settings.respawn_point;
                velocity = Vec3::ZERO;
            }

            if let Some(shape) = self.shapes.get_mut(handle) {
                shape.position = position;
                shape.velocity = velocity;

                if fell {
                    tracing::warn!(
                        "{} {:?} fell below {}, respawned at {:?}",
                        shape.kind.name(),
                        handle,
                        self.settings.kill_floor_y,
                        position
                    );
                }
            }
        }
    }

    /// Apply one frame of input to the player and integrate it.
    ///
    /// Returns the camera position, or `None` without a player.
    pub fn drive_player(&mut self, ctx: &FrameContext) -> Option<Vec3> {
        let direction = ctx.movement_intent();
        let player = self.player.as_mut()?;

        player.set_sprint(ctx.input.is_down(Action::Sprint));
        player.set_crouch(ctx.input.is_down(Action::Crouch));
        if ctx.input.is_down(Action::Jump) {
            player.jump();
        }
        player.move_dir(direction);

        self.step_player(ctx.dt)
    }

    /// Integrate the player against the shapes and apply the kill floor.
    ///
    /// Returns the camera position, or `None` without a player.
    pub fn step_player(&mut self, dt: f32) -> Option<Vec3> {
        let player = self.player.as_mut()?;
        player.update(dt, &self.shapes);

        if player.position().y < self.settings.kill_floor_y {
            tracing::info!(
                "Player fell below {}, respawning at {:?}",
                self.settings.kill_floor_y,
                player.settings().spawn_point
            );
            player.respawn();
        }

        Some(player.camera_position())
    }
}

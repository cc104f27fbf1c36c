// SPDX-License-Identifier: MIT OR Apache-2.0
//! First-person player controller.
//!
//! The player is a box-shaped [`RigidShape`] with its own gravity, a
//! crouch/stand height switch, a closed-form jump and a grounded flag. Each
//! tick is integrated in two phases:
//!
//! 1. Horizontal: vertical velocity is parked, the body moves on X/Z and is
//!    rolled back if it ends up overlapping anything.
//! 2. Vertical: the body moves on Y alone. A blocked downward step lands the
//!    player, a blocked upward step is a ceiling hit.
//!
//! Splitting the phases keeps wall contact from cancelling gravity and floor
//! contact from cancelling walking.

use crate::arena::ShapeArena;
use crate::config::PlayerSettings;
use crate::shape::RigidShape;
use glam::Vec3;

/// Combined grounded/crouched state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// In the air, standing height
    Airborne,
    /// On the ground, standing height
    Grounded,
    /// On the ground, crouched
    GroundedCrouched,
    /// In the air, crouched
    AirborneCrouched,
}

impl PlayerState {
    /// Check if the player has ground support
    pub fn is_grounded(&self) -> bool {
        matches!(self, PlayerState::Grounded | PlayerState::GroundedCrouched)
    }

    /// Check if the player is crouched
    pub fn is_crouched(&self) -> bool {
        matches!(
            self,
            PlayerState::GroundedCrouched | PlayerState::AirborneCrouched
        )
    }
}

/// Horizontal speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTier {
    /// Crouched
    Crouch,
    /// Default
    Walk,
    /// Sprinting
    Run,
}

/// Box-bodied player with two-phase integration
#[derive(Debug, Clone)]
pub struct PlayerController {
    /// Collision body; `scale.y` is the current height
    pub body: RigidShape,
    settings: PlayerSettings,
    grounded: bool,
    crouching: bool,
    sprinting: bool,
}

impl PlayerController {
    /// Create a standing, airborne player at `settings.spawn_point`
    pub fn new(settings: PlayerSettings) -> Self {
        let body = RigidShape::cube()
            .with_position(settings.spawn_point)
            .with_scale(Vec3::new(
                settings.width,
                settings.stand_height,
                settings.width,
            ))
            .with_gravity(false)
            .with_collision(true);

        Self {
            body,
            settings,
            grounded: false,
            crouching: false,
            sprinting: false,
        }
    }

    /// Create a player at an explicit position
    pub fn spawn_at(settings: PlayerSettings, position: Vec3) -> Self {
        let mut player = Self::new(settings);
        player.body.position = position;
        player
    }

    /// Tunables
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Body center
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Body velocity
    pub fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    /// True if the last downward step this tick was blocked
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// True while crouched
    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// True while sprinting
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Current combined state
    pub fn state(&self) -> PlayerState {
        match (self.grounded, self.crouching) {
            (true, false) => PlayerState::Grounded,
            (true, true) => PlayerState::GroundedCrouched,
            (false, false) => PlayerState::Airborne,
            (false, true) => PlayerState::AirborneCrouched,
        }
    }

    /// Force the grounded flag (used when spawning on a floor)
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Toggle sprinting
    pub fn set_sprint(&mut self, sprinting: bool) {
        self.sprinting = sprinting;
    }

    /// Speed tier for the current flags; crouching wins over sprinting
    pub fn speed_tier(&self) -> SpeedTier {
        if self.crouching {
            SpeedTier::Crouch
        } else if self.sprinting {
            SpeedTier::Run
        } else {
            SpeedTier::Walk
        }
    }

    /// Horizontal speed for the current tier
    pub fn current_speed(&self) -> f32 {
        match self.speed_tier() {
            SpeedTier::Crouch => self.settings.crouch_speed,
            SpeedTier::Walk => self.settings.walk_speed,
            SpeedTier::Run => self.settings.run_speed,
        }
    }

    /// Set horizontal velocity from a movement direction.
    ///
    /// A zero direction stops horizontal motion instantly. `velocity.y` is
    /// never touched.
    pub fn move_dir(&mut self, direction: Vec3) {
        let vertical = self.body.velocity.y;

        if direction.length_squared() > 0.0 {
            self.body.velocity = direction.normalize() * self.current_speed();
        } else {
            self.body.velocity.x = 0.0;
            self.body.velocity.z = 0.0;
        }

        self.body.velocity.y = vertical;
    }

    /// Initial vertical speed that peaks at `jump_height` under `gravity`
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.settings.gravity.abs() * self.settings.jump_height).sqrt()
    }

    /// Jump if grounded and standing. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.grounded || self.crouching {
            return false;
        }

        self.body.velocity.y = self.jump_velocity();
        self.grounded = false;
        true
    }

    /// Switch between crouch and stand height, keeping the feet in place.
    ///
    /// No-op when already in the requested state.
    pub fn set_crouch(&mut self, crouching: bool) {
        if crouching == self.crouching {
            return;
        }

        let half_delta = (self.settings.stand_height - self.settings.crouch_height) / 2.0;
        self.crouching = crouching;

        if crouching {
            self.body.scale.y = self.settings.crouch_height;
            self.body.position.y -= half_delta;
        } else {
            self.body.position.y += half_delta;
            self.body.scale.y = self.settings.stand_height;
        }
    }

    /// Eye position: a fixed fraction of the current height above the center
    pub fn camera_position(&self) -> Vec3 {
        self.body.position
            + Vec3::new(0.0, self.body.scale.y * self.settings.eye_height_factor, 0.0)
    }

    /// Put the player back at its spawn point, standing and at rest
    pub fn respawn(&mut self) {
        self.set_crouch(false);
        self.body.position = self.settings.spawn_point;
        self.body.velocity = Vec3::ZERO;
        self.grounded = false;
    }

    /// Advance one tick against the world shapes
    pub fn update(&mut self, dt: f32, world: &ShapeArena) {
        self.apply_gravity(dt);

        // Horizontal phase
        let vertical_velocity = self.body.velocity.y;
        self.body.velocity.y = 0.0;

        let before = self.body.position;
        let horizontal_step = self.body.velocity * dt;
        self.body.position += horizontal_step;
        self.resolve_collisions(world, horizontal_step, before);

        self.body.velocity.y = vertical_velocity;

        // Vertical phase
        let was_grounded = self.grounded;
        let before = self.body.position;
        let vertical_step = Vec3::new(0.0, self.body.velocity.y * dt, 0.0);
        self.body.position += vertical_step;

        self.grounded = false;
        self.resolve_collisions(world, vertical_step, before);

        if self.grounded && !was_grounded {
            tracing::trace!("Player landed at {:?}", self.body.position);
        }
    }

    fn apply_gravity(&mut self, dt: f32) {
        self.body.velocity.y += self.settings.gravity * dt;
        if self.body.velocity.y < self.settings.terminal_velocity {
            self.body.velocity.y = self.settings.terminal_velocity;
        }
    }

    /// Roll back to `before` if the body overlaps any collidable shape.
    ///
    /// The sign of `step.y` decides landing vs ceiling. Returns true if the
    /// step was rolled back.
    fn resolve_collisions(&mut self, world: &ShapeArena, step: Vec3, before: Vec3) -> bool {
        if !self.body.has_collision {
            return false;
        }

        let body = self.body.aabb();
        let blocked = world
            .iter()
            .any(|(_, other)| other.has_collision && body.overlaps(&other.aabb()));

        if !blocked {
            return false;
        }

        if step.y < 0.0 {
            self.grounded = true;
            self.body.velocity.y = 0.0;
        } else if step.y > 0.0 {
            self.body.velocity.y = 0.0;
        }

        self.body.position = before;
        true
    }
}

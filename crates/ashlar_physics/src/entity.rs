// SPDX-License-Identifier: MIT OR Apache-2.0
//! Simple AI-driven entities.
//!
//! An [`Entity`] is a point mass with health that drags an optional visual
//! shape around by handle. Friendly and enemy behaviour is a closed
//! [`Behavior`] enum matched in [`Entity::update`], not a trait object.

use crate::arena::{ShapeArena, ShapeHandle};
use glam::Vec3;
use rand::Rng;

/// Velocity multiplier applied every update
const FRICTION: f32 = 0.9;
/// Velocities shorter than this snap to zero
const REST_SPEED: f32 = 0.01;
/// An enemy slower than this picks a new patrol direction
const PATROL_IDLE_SPEED: f32 = 0.1;

/// Friendly wander state
#[derive(Debug, Clone, PartialEq)]
pub struct Wander {
    /// Current flat heading
    pub direction: Vec3,
    /// Seconds since the heading was chosen
    pub timer: f32,
    /// Seconds until the next re-roll
    pub interval: f32,
}

impl Wander {
    /// Wander re-roll interval bounds in seconds
    pub const INTERVAL: (f32, f32) = (2.0, 5.0);

    fn new(rng: &mut impl Rng) -> Self {
        Self {
            direction: random_flat_direction(rng),
            timer: 0.0,
            interval: rng.gen_range(Self::INTERVAL.0..=Self::INTERVAL.1),
        }
    }

    fn reroll(&mut self, rng: &mut impl Rng) {
        self.direction = random_flat_direction(rng);
        self.interval = rng.gen_range(Self::INTERVAL.0..=Self::INTERVAL.1);
        self.timer = 0.0;
    }
}

/// Enemy pursuit state
#[derive(Debug, Clone, PartialEq)]
pub struct Pursuit {
    /// Last known target position
    pub target: Vec3,
    /// Chasing `target` instead of patrolling
    pub hostile: bool,
    /// Stop chasing inside this distance
    pub attack_range: f32,
}

/// Behaviour tag
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Wanders in random flat directions
    Friendly(Wander),
    /// Patrols until it has a target, then chases it
    Enemy(Pursuit),
}

impl Behavior {
    /// Visual tint after death
    pub fn death_color(&self) -> Vec3 {
        match self {
            Behavior::Friendly(_) => Vec3::splat(0.3),
            Behavior::Enemy(_) => Vec3::new(0.5, 0.1, 0.1),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Friendly(_) => "friendly",
            Behavior::Enemy(_) => "enemy",
        }
    }
}

/// A moving, damageable scene actor
#[derive(Debug, Clone)]
pub struct Entity {
    /// Current health, never below zero
    pub health: f32,
    /// Health at spawn
    pub max_health: f32,
    /// Velocity added per `move_toward` call
    pub move_speed: f32,
    /// World position
    pub position: Vec3,
    /// Units per second, decays by friction
    pub velocity: Vec3,
    /// Last non-zero movement direction
    pub direction: Vec3,
    /// Shape kept in sync with `position`
    pub visual: Option<ShapeHandle>,
    /// AI behaviour
    pub behavior: Behavior,
    alive: bool,
}

impl Entity {
    fn with_behavior(position: Vec3, health: f32, move_speed: f32, behavior: Behavior) -> Self {
        tracing::info!("Spawned {} entity at {:?}", behavior.name(), position);
        Self {
            health,
            max_health: health,
            move_speed,
            position,
            velocity: Vec3::ZERO,
            direction: Vec3::Z,
            visual: None,
            behavior,
            alive: true,
        }
    }

    /// Friendly wanderer: 50 health, speed 1.5
    pub fn friendly(position: Vec3, rng: &mut impl Rng) -> Self {
        Self::with_behavior(position, 50.0, 1.5, Behavior::Friendly(Wander::new(rng)))
    }

    /// Enemy: 75 health, speed 2, attack range 1.5
    pub fn enemy(position: Vec3) -> Self {
        Self::with_behavior(
            position,
            75.0,
            2.0,
            Behavior::Enemy(Pursuit {
                target: position,
                hostile: false,
                attack_range: 1.5,
            }),
        )
    }

    /// Builder: attach a visual shape
    pub fn with_visual(mut self, visual: ShapeHandle) -> Self {
        self.visual = Some(visual);
        self
    }

    /// False once health reached zero or `die` was called
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Health as a fraction of max health
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    /// Point an enemy at a position and make it hostile. Ignored by friendlies.
    pub fn set_target(&mut self, target: Vec3) {
        if let Behavior::Enemy(pursuit) = &mut self.behavior {
            pursuit.target = target;
            pursuit.hostile = true;
        }
    }

    /// Add `move_speed` worth of velocity along a direction
    pub fn move_toward(&mut self, direction: Vec3) {
        if !self.alive {
            return;
        }

        let direction = if direction.length_squared() > 0.0 {
            let normalized = direction.normalize();
            self.direction = normalized;
            normalized
        } else {
            direction
        };

        self.velocity += direction * self.move_speed;
    }

    /// Integrate, sync the visual shape, then run the behaviour
    pub fn update(&mut self, dt: f32, shapes: &mut ShapeArena, rng: &mut impl Rng) {
        if !self.alive {
            return;
        }

        self.position += self.velocity * dt;
        if let Some(shape) = self.visual.and_then(|handle| shapes.get_mut(handle)) {
            shape.position = self.position;
        }

        self.velocity *= FRICTION;
        if self.velocity.length() < REST_SPEED {
            self.velocity = Vec3::ZERO;
        }

        let steer = match &mut self.behavior {
            Behavior::Friendly(wander) => {
                wander.timer += dt;
                if wander.timer >= wander.interval {
                    wander.reroll(rng);
                }
                Some(wander.direction)
            }
            Behavior::Enemy(pursuit) if pursuit.hostile => {
                let mut to_target = pursuit.target - self.position;
                to_target.y = 0.0;

                if to_target.length() > pursuit.attack_range {
                    Some(to_target)
                } else {
                    self.velocity = Vec3::ZERO;
                    None
                }
            }
            Behavior::Enemy(_) => {
                (self.velocity.length() < PATROL_IDLE_SPEED).then(|| random_flat_direction(rng))
            }
        };

        if let Some(direction) = steer {
            self.move_toward(direction);
        }
    }

    /// Subtract health; enemies turn hostile, zero health kills
    pub fn take_damage(&mut self, amount: f32, shapes: &mut ShapeArena) {
        if !self.alive {
            return;
        }

        self.health = (self.health - amount).max(0.0);
        tracing::debug!(
            "{} entity took {} damage, health {}/{}",
            self.behavior.name(),
            amount,
            self.health,
            self.max_health
        );

        if let Behavior::Enemy(pursuit) = &mut self.behavior {
            pursuit.hostile = true;
        }

        if self.health <= 0.0 {
            self.die(shapes);
        }
    }

    /// Kill the entity: stop it and tint its visual. Runs once.
    pub fn die(&mut self, shapes: &mut ShapeArena) {
        if !self.alive {
            return;
        }

        self.alive = false;
        self.velocity = Vec3::ZERO;

        if let Some(shape) = self.visual.and_then(|handle| shapes.get_mut(handle)) {
            shape.color = self.behavior.death_color();
        }

        tracing::info!("{} entity died", self.behavior.name());
    }
}

fn random_flat_direction(rng: &mut impl Rng) -> Vec3 {
    let direction = Vec3::new(rng.gen_range(-1.0..=1.0), 0.0, rng.gen_range(-1.0..=1.0));
    if direction.length_squared() > 0.0 {
        direction.normalize()
    } else {
        Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::RigidShape;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_friendly_wanders_on_the_ground_plane() {
        let mut rng = rng();
        let mut shapes = ShapeArena::new();
        let visual = shapes.insert(RigidShape::cube().with_collision(false));
        let mut friendly = Entity::friendly(Vec3::ZERO, &mut rng).with_visual(visual);

        for _ in 0..120 {
            friendly.update(1.0 / 60.0, &mut shapes, &mut rng);
        }

        assert!(friendly.position.length() > 0.0);
        assert_eq!(friendly.position.y, 0.0);
        assert_eq!(shapes.get(visual).map(|s| s.position), Some(friendly.position));
        assert!((friendly.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_wander_interval_in_range() {
        let mut rng = rng();
        for _ in 0..50 {
            let Behavior::Friendly(wander) = Entity::friendly(Vec3::ZERO, &mut rng).behavior else {
                panic!("expected friendly behaviour");
            };
            assert!((2.0..=5.0).contains(&wander.interval));
        }
    }

    #[test]
    fn test_enemy_chases_and_stops_in_range() {
        let mut rng = rng();
        let mut shapes = ShapeArena::new();
        let mut enemy = Entity::enemy(Vec3::ZERO);
        let target = Vec3::new(10.0, 0.0, 0.0);

        enemy.set_target(target);
        enemy.update(1.0 / 60.0, &mut shapes, &mut rng);
        assert!(enemy.velocity.x > 0.0);
        assert_eq!(enemy.velocity.z, 0.0);

        enemy.position = Vec3::new(9.0, 0.0, 0.0);
        enemy.update(1.0 / 60.0, &mut shapes, &mut rng);
        assert_eq!(enemy.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_idle_enemy_patrols() {
        let mut rng = rng();
        let mut shapes = ShapeArena::new();
        let mut enemy = Entity::enemy(Vec3::ZERO);

        enemy.update(1.0 / 60.0, &mut shapes, &mut rng);
        assert!((enemy.velocity.length() - 2.0).abs() < 1e-4);
        assert_eq!(enemy.velocity.y, 0.0);
    }

    #[test]
    fn test_damage_makes_enemy_hostile_and_kills_once() {
        let mut shapes = ShapeArena::new();
        let visual = shapes.insert(RigidShape::cube());
        let mut enemy = Entity::enemy(Vec3::ZERO).with_visual(visual);

        enemy.take_damage(25.0, &mut shapes);
        assert_eq!(enemy.health, 50.0);
        assert!(matches!(
            enemy.behavior,
            Behavior::Enemy(Pursuit { hostile: true, .. })
        ));

        enemy.take_damage(500.0, &mut shapes);
        assert_eq!(enemy.health, 0.0);
        assert!(!enemy.is_alive());
        assert_eq!(
            shapes.get(visual).map(|s| s.color),
            Some(Vec3::new(0.5, 0.1, 0.1))
        );

        // Dead entities ignore everything
        enemy.take_damage(10.0, &mut shapes);
        enemy.move_toward(Vec3::X);
        assert_eq!(enemy.health, 0.0);
        assert_eq!(enemy.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_enemy_in_attack_range_stops() {
        let mut rng = rng();
        let mut shapes = ShapeArena::new();
        let mut enemy = Entity::enemy(Vec3::ZERO);
        enemy.set_target(Vec3::ZERO);
        enemy.velocity = Vec3::new(1.0, 0.0, 0.0);

        // Inside attack range the enemy stops dead
        enemy.update(1.0 / 60.0, &mut shapes, &mut rng);
        assert_eq!(enemy.velocity, Vec3::ZERO);
    }
}

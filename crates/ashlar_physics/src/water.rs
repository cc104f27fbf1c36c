// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animated water surface with object ripples.
//!
//! The surface height is a sum of five travelling sine/cosine waves plus
//! ripples from objects touching the surface. Ripples live in a fixed ring
//! of [`MAX_RIPPLES`] slots; a new ripple overwrites the oldest slot.

use glam::Vec3;

/// Ripple ring capacity
pub const MAX_RIPPLES: usize = 8;

/// Seconds a ripple stays active
pub const RIPPLE_LIFETIME: f32 = 5.0;

/// Expansion speed of a ripple ring in units per second
const RIPPLE_SPEED: f32 = 3.0;
/// Central difference step for normals
const NORMAL_DELTA: f32 = 0.1;
/// Objects whose top is within this depth under the surface still ripple it
const SUBMERGE_TOLERANCE: f32 = 0.5;

/// One ripple slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ripple {
    /// Origin on the surface
    pub position: Vec3,
    /// Water time at creation
    pub start_time: f32,
    /// Slot in use
    pub active: bool,
}

impl Ripple {
    /// Height contribution at `(x, z)` at water time `time`
    fn height_at(&self, x: f32, z: f32, time: f32) -> f32 {
        if !self.active {
            return 0.0;
        }

        let age = time - self.start_time;
        if !(0.0..=RIPPLE_LIFETIME).contains(&age) {
            return 0.0;
        }

        let dist = (x - self.position.x).hypot(z - self.position.z);
        let ring_dist = (dist - age * RIPPLE_SPEED).abs();
        let decay = (-age * 0.8).exp() * (-ring_dist * 2.0).exp();

        (dist * 8.0 - age * 10.0).sin() * decay * 0.1
    }
}

/// Fixed ring of ripples with round-robin overwrite
#[derive(Debug, Clone, Default)]
pub struct RippleBuffer {
    slots: [Ripple; MAX_RIPPLES],
    next: usize,
}

impl RippleBuffer {
    /// Empty ring
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a ripple into the next slot, overwriting whatever was there
    pub fn push(&mut self, position: Vec3, time: f32) {
        self.slots[self.next] = Ripple {
            position,
            start_time: time,
            active: true,
        };
        self.next = (self.next + 1) % MAX_RIPPLES;
    }

    /// Deactivate ripples older than [`RIPPLE_LIFETIME`]
    pub fn expire(&mut self, time: f32) {
        for ripple in &mut self.slots {
            if ripple.active && time - ripple.start_time > RIPPLE_LIFETIME {
                ripple.active = false;
            }
        }
    }

    /// Number of active slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|r| r.active).count()
    }

    /// All slots, active or not, in ring order
    pub fn slots(&self) -> &[Ripple; MAX_RIPPLES] {
        &self.slots
    }

    fn height_at(&self, x: f32, z: f32, time: f32) -> f32 {
        self.slots.iter().map(|r| r.height_at(x, z, time)).sum()
    }
}

/// Base wave parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Time multiplier
    pub speed: f32,
    /// Amplitude of the main wave
    pub height: f32,
    /// Spatial frequency of the main wave
    pub frequency: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            height: 0.1,
            frequency: 2.0,
        }
    }
}

/// A rectangular pond of animated water
#[derive(Debug, Clone)]
pub struct Water {
    /// Center of the pond; `y` is the rest level
    pub position: Vec3,
    /// Footprint multiplier on X and Z
    pub scale: Vec3,
    /// Extent along X before scaling
    pub width: f32,
    /// Extent along Z before scaling
    pub depth: f32,
    /// Grid vertices per side for [`Water::sample_grid`]
    pub resolution: u32,
    /// Wave shape
    pub waves: WaveParams,
    /// Surface tint
    pub color: Vec3,
    time: f32,
    ripples: RippleBuffer,
}

impl Water {
    /// Pond of the given footprint at the origin
    pub fn new(width: f32, depth: f32, resolution: u32) -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            width,
            depth,
            resolution,
            waves: WaveParams::default(),
            color: Vec3::new(0.02, 0.06, 0.1),
            time: 0.0,
            ripples: RippleBuffer::new(),
        }
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

    /// Seconds of water time elapsed
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Ripple ring
    pub fn ripples(&self) -> &RippleBuffer {
        &self.ripples
    }

    /// Advance water time and retire old ripples
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.ripples.expire(self.time);
    }

    /// Add a ripple at a world position
    pub fn add_ripple(&mut self, position: Vec3) {
        self.ripples.push(position, self.time);
    }

    /// True if `(x, z)` lies over the pond footprint (edges included)
    pub fn is_in_bounds(&self, x: f32, z: f32) -> bool {
        let half_width = self.width * self.scale.x / 2.0;
        let half_depth = self.depth * self.scale.z / 2.0;
        let (local_x, local_z) = (x - self.position.x, z - self.position.z);

        (-half_width..=half_width).contains(&local_x)
            && (-half_depth..=half_depth).contains(&local_z)
    }

    /// Wave offset from the rest level at world `(x, z)`, ripples included
    pub fn wave_height(&self, x: f32, z: f32) -> f32 {
        let WaveParams {
            speed,
            height,
            frequency,
        } = self.waves;
        let t = self.time;

        let base = (x * frequency + t * speed).sin() * height
            + (z * frequency * 0.8 + t * speed * 1.3).sin() * height * 0.5
            + ((x + z) * frequency * 0.5 + t * speed * 0.7).sin() * height * 0.3
            + (x * frequency * 2.0 - t * speed * 1.5).sin() * height * 0.2
            + (z * frequency * 1.5 + t * speed * 0.9).cos() * height * 0.25;

        base + self.ripples.height_at(x, z, t)
    }

    /// World surface height, `None` outside the pond
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.is_in_bounds(x, z)
            .then(|| self.position.y + self.wave_height(x, z))
    }

    /// Surface normal from central differences
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let d = NORMAL_DELTA;
        let left = self.wave_height(x - d, z);
        let right = self.wave_height(x + d, z);
        let down = self.wave_height(x, z - d);
        let up = self.wave_height(x, z + d);

        Vec3::new(left - right, 2.0 * d, down - up).normalize()
    }

    /// Ripple the surface if an object of `radius` around `position` touches it.
    ///
    /// Returns whether a ripple was added.
    pub fn check_object_interaction(&mut self, position: Vec3, radius: f32) -> bool {
        let Some(surface) = self.height_at(position.x, position.z) else {
            return false;
        };

        let bottom = position.y - radius;
        let top = position.y + radius;
        if bottom <= surface && top >= surface - SUBMERGE_TOLERANCE {
            self.add_ripple(Vec3::new(position.x, surface, position.z));
            return true;
        }

        false
    }

    /// Surface heights and normals on the render grid, row by row along Z
    pub fn sample_grid(&self) -> Vec<(f32, Vec3)> {
        let n = self.resolution.max(2);
        let step_x = self.width / (n - 1) as f32;
        let step_z = self.depth / (n - 1) as f32;

        let mut samples = Vec::with_capacity((n * n) as usize);
        for iz in 0..n {
            for ix in 0..n {
                let local_x = -self.width / 2.0 + ix as f32 * step_x;
                let local_z = -self.depth / 2.0 + iz as f32 * step_z;
                let x = local_x * self.scale.x + self.position.x;
                let z = local_z * self.scale.z + self.position.z;

                samples.push((self.wave_height(x, z), self.normal_at(x, z)));
            }
        }
        samples
    }
}

impl Default for Water {
    fn default() -> Self {
        Self::new(10.0, 10.0, 64)
    }
}

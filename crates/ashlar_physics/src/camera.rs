// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mouse look and the per-frame camera transform.

use crate::config::LookSettings;
use glam::Vec3;

/// Camera transform for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye position
    pub position: Vec3,
    /// Normalized look direction
    pub front: Vec3,
    /// World up
    pub up: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

/// Yaw/pitch accumulator fed by mouse motion
#[derive(Debug, Clone)]
pub struct LookController {
    yaw: f32,
    pitch: f32,
    sensitivity: f32,
    pitch_limit: f32,
    last: Option<(f32, f32)>,
}

impl LookController {
    /// Create from look settings
    pub fn new(settings: &LookSettings) -> Self {
        Self {
            yaw: settings.yaw,
            pitch: settings.pitch,
            sensitivity: settings.sensitivity,
            pitch_limit: settings.pitch_limit,
            last: None,
        }
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Feed an absolute cursor position.
    ///
    /// The first sample only latches the cursor. Screen Y grows downward so
    /// the vertical offset is inverted.
    pub fn handle_mouse(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.last.replace((x, y)) else {
            return;
        };

        let x_offset = (x - last_x) * self.sensitivity;
        let y_offset = (last_y - y) * self.sensitivity;

        self.yaw += x_offset;
        self.pitch = (self.pitch + y_offset).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Forget the latched cursor, e.g. after the window regains focus
    pub fn reset_latch(&mut self) {
        self.last = None;
    }

    /// Normalized look direction
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Write the look direction into a camera state
    pub fn apply(&self, camera: &mut CameraState) {
        camera.front = self.front();
    }
}

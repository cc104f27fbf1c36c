// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame context threaded through scene update and draw calls.

use crate::camera::CameraState;
use crate::input::{Action, InputSnapshot};
use glam::Vec3;

/// Everything a scene needs for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContext {
    /// Clamped simulation delta in seconds
    pub dt: f32,
    /// Camera transform; the scene writes the eye position back
    pub camera: CameraState,
    /// Action state for this frame
    pub input: InputSnapshot,
}

impl FrameContext {
    /// Create a context for one frame
    pub fn new(dt: f32, camera: CameraState, input: InputSnapshot) -> Self {
        Self { dt, camera, input }
    }

    /// Movement direction on the ground plane from the held actions
    pub fn movement_intent(&self) -> Vec3 {
        movement_intent(&self.camera, &self.input)
    }
}

/// Flattened look direction and its right vector.
///
/// Looking straight up or down leaves no horizontal component; both vectors
/// come back zero then.
pub fn flat_basis(camera: &CameraState) -> (Vec3, Vec3) {
    let flat_front = Vec3::new(camera.front.x, 0.0, camera.front.z).normalize_or_zero();
    let flat_right = flat_front.cross(camera.up).normalize_or_zero();
    (flat_front, flat_right)
}

/// Sum of the held direction actions, normalized. Zero stays zero.
pub fn movement_intent(camera: &CameraState, input: &InputSnapshot) -> Vec3 {
    let (front, right) = flat_basis(camera);

    let mut direction = Vec3::ZERO;
    if input.is_down(Action::Forward) {
        direction += front;
    }
    if input.is_down(Action::Back) {
        direction -= front;
    }
    if input.is_down(Action::StrafeLeft) {
        direction -= right;
    }
    if input.is_down(Action::StrafeRight) {
        direction += right;
    }

    direction.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ActionSet, ActionState};

    fn holding(actions: &[Action]) -> InputSnapshot {
        let mut state = ActionState::new();
        state.update(actions.iter().copied().collect::<ActionSet>());
        InputSnapshot { actions: state }
    }

    #[test]
    fn test_forward_ignores_pitch() {
        let camera = CameraState {
            front: Vec3::new(0.0, 0.8, -0.6),
            ..CameraState::default()
        };
        let dir = movement_intent(&camera, &holding(&[Action::Forward]));
        assert!(dir.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_strafe_right_is_positive_x_facing_negative_z() {
        let camera = CameraState::default();
        let dir = movement_intent(&camera, &holding(&[Action::StrafeRight]));
        assert!(dir.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let camera = CameraState::default();
        let dir = movement_intent(&camera, &holding(&[Action::Forward, Action::StrafeLeft]));
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x < 0.0 && dir.z < 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let camera = CameraState::default();
        let dir = movement_intent(&camera, &holding(&[Action::Forward, Action::Back]));
        assert_eq!(dir, Vec3::ZERO);
    }
}

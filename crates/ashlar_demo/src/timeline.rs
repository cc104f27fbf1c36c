// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scripted input for the headless demo.

use ashlar_physics::{Action, ActionSet};
use std::ops::Range;

/// An action held over a range of frames
#[derive(Debug, Clone)]
struct Hold {
    frames: Range<u32>,
    action: Action,
}

/// Frame-indexed stand-in for keyboard and mouse
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    holds: Vec<Hold>,
    /// Frames during which the cursor sweeps right, and pixels per frame
    mouse_sweep: Option<(Range<u32>, f32)>,
    /// FPS cap changes, like pressing 1 / 2 / 0
    fps_caps: Vec<(u32, Option<u32>)>,
}

impl Timeline {
    /// Empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `action` for the given frames
    pub fn hold(mut self, frames: Range<u32>, action: Action) -> Self {
        self.holds.push(Hold { frames, action });
        self
    }

    /// Sweep the cursor right by `pixels` per frame
    pub fn sweep_mouse(mut self, frames: Range<u32>, pixels: f32) -> Self {
        self.mouse_sweep = Some((frames, pixels));
        self
    }

    /// Change the FPS cap at a frame
    pub fn fps_cap(mut self, frame: u32, cap: Option<u32>) -> Self {
        self.fps_caps.push((frame, cap));
        self
    }

    /// Walk, sprint, jump, crouch-strafe, look around, hit something, reload,
    /// then visit the showcase and come back
    pub fn scripted() -> Self {
        Self::new()
            .hold(60..180, Action::Forward)
            .hold(100..160, Action::Sprint)
            .hold(200..202, Action::Jump)
            .hold(240..300, Action::Crouch)
            .hold(240..300, Action::StrafeLeft)
            .hold(320..321, Action::TogglePostProcess)
            .sweep_mouse(360..420, 5.0)
            .hold(400..460, Action::Forward)
            .hold(480..481, Action::Interact)
            .hold(540..541, Action::ReloadScene)
            .hold(560..561, Action::NextScene)
            .hold(580..581, Action::NextScene)
            .fps_cap(120, Some(30))
            .fps_cap(300, Some(70))
            .fps_cap(480, None)
    }

    /// Actions held on a frame
    pub fn held_at(&self, frame: u32) -> ActionSet {
        self.holds
            .iter()
            .filter(|hold| hold.frames.contains(&frame))
            .map(|hold| hold.action)
            .collect()
    }

    /// Cursor position on a frame, `None` when the mouse is untouched
    pub fn cursor_at(&self, frame: u32) -> Option<(f32, f32)> {
        let (frames, pixels) = self.mouse_sweep.as_ref()?;
        frames
            .contains(&frame)
            .then(|| ((frame - frames.start) as f32 * pixels, 0.0))
    }

    /// New FPS cap taking effect on a frame
    pub fn fps_cap_at(&self, frame: u32) -> Option<Option<u32>> {
        self.fps_caps
            .iter()
            .find(|(at, _)| *at == frame)
            .map(|(_, cap)| *cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_holds_combine() {
        let timeline = Timeline::scripted();
        let held = timeline.held_at(120);
        assert!(held.contains(Action::Forward));
        assert!(held.contains(Action::Sprint));
        assert!(!held.contains(Action::Crouch));
        assert!(timeline.held_at(0).is_empty());
    }

    #[test]
    fn test_mouse_sweep() {
        let timeline = Timeline::new().sweep_mouse(10..20, 4.0);
        assert_eq!(timeline.cursor_at(9), None);
        assert_eq!(timeline.cursor_at(10), Some((0.0, 0.0)));
        assert_eq!(timeline.cursor_at(12), Some((8.0, 0.0)));
        assert_eq!(timeline.cursor_at(20), None);
    }

    #[test]
    fn test_fps_caps() {
        let timeline = Timeline::scripted();
        assert_eq!(timeline.fps_cap_at(120), Some(Some(30)));
        assert_eq!(timeline.fps_cap_at(480), Some(None));
        assert_eq!(timeline.fps_cap_at(121), None);
    }
}

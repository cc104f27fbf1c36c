// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame input snapshot.
//!
//! The engine never polls devices. The driver maps its keys to [`Action`]s,
//! feeds the held set into [`ActionState::update`] once per frame and hands
//! the result to the scene inside a [`crate::frame::FrameContext`].

use serde::{Deserialize, Serialize};

/// Logical actions the scene reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Walk along the look direction
    Forward,
    /// Walk against the look direction
    Back,
    /// Strafe left
    StrafeLeft,
    /// Strafe right
    StrafeRight,
    /// Jump
    Jump,
    /// Hold to crouch
    Crouch,
    /// Hold to sprint
    Sprint,
    /// Use / interact
    Interact,
    /// Rebuild the scene
    ReloadScene,
    /// Toggle the post-processing pass
    TogglePostProcess,
    /// Switch to the next scene
    NextScene,
}

impl Action {
    /// Every action, in bit order
    pub const ALL: [Action; 11] = [
        Action::Forward,
        Action::Back,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Jump,
        Action::Crouch,
        Action::Sprint,
        Action::Interact,
        Action::ReloadScene,
        Action::TogglePostProcess,
        Action::NextScene,
    ];

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of held actions packed into a bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u16);

impl ActionSet {
    /// Nothing held
    pub fn empty() -> Self {
        Self(0)
    }

    /// Add an action
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    /// Remove an action
    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    /// True if `action` is in the set
    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    /// True if nothing is held
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = Self::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Held state for this frame and the previous one, for edge detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    current: ActionSet,
    previous: ActionSet,
}

impl ActionState {
    /// Create with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: the current set becomes the previous one
    pub fn update(&mut self, held: ActionSet) {
        self.previous = self.current;
        self.current = held;
    }

    /// Held this frame
    pub fn is_down(&self, action: Action) -> bool {
        self.current.contains(action)
    }

    /// Held this frame but not the previous one
    pub fn is_pressed(&self, action: Action) -> bool {
        self.current.contains(action) && !self.previous.contains(action)
    }

    /// Held the previous frame but not this one
    pub fn is_released(&self, action: Action) -> bool {
        !self.current.contains(action) && self.previous.contains(action)
    }

    /// Actions held this frame
    pub fn held(&self) -> ActionSet {
        self.current
    }
}

/// Input handed to the scene for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Held/pressed/released actions
    pub actions: ActionState,
}

impl InputSnapshot {
    /// Held this frame
    pub fn is_down(&self, action: Action) -> bool {
        self.actions.is_down(action)
    }

    /// Went down this frame
    pub fn is_pressed(&self, action: Action) -> bool {
        self.actions.is_pressed(action)
    }

    /// Went up this frame
    pub fn is_released(&self, action: Action) -> bool {
        self.actions.is_released(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_bits_are_distinct() {
        let all: ActionSet = Action::ALL.into_iter().collect();
        assert_eq!(all.0.count_ones(), Action::ALL.len() as u32);
    }

    #[test]
    fn test_press_hold_release_edges() {
        let mut state = ActionState::new();
        let jump: ActionSet = [Action::Jump].into_iter().collect();

        state.update(jump);
        assert!(state.is_down(Action::Jump));
        assert!(state.is_pressed(Action::Jump));
        assert!(!state.is_released(Action::Jump));

        state.update(jump);
        assert!(state.is_down(Action::Jump));
        assert!(!state.is_pressed(Action::Jump));

        state.update(ActionSet::empty());
        assert!(!state.is_down(Action::Jump));
        assert!(state.is_released(Action::Jump));

        state.update(ActionSet::empty());
        assert!(!state.is_released(Action::Jump));
    }

    #[test]
    fn test_set_insert_remove() {
        let mut set = ActionSet::empty();
        set.insert(Action::Sprint);
        set.insert(Action::Forward);
        assert!(set.contains(Action::Sprint));
        assert!(!set.contains(Action::Back));

        set.remove(Action::Sprint);
        assert!(!set.contains(Action::Sprint));
        assert!(!set.is_empty());
    }
}

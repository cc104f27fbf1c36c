// SPDX-License-Identifier: MIT OR Apache-2.0
//! Physics core for the Ashlar engine.
//!
//! This crate provides the simulation side of a small first-person demo:
//! - AABB rigid shapes with gravity and rollback collision
//! - A two-phase player controller with crouch, sprint and jump
//! - Frame context, input snapshot and frame clock for the driver loop
//! - Entities with simple AI and an animated water pond
//! - A scene lifecycle with switching, two scenes and a renderer seam
//!
//! ## Architecture
//!
//! Shapes live in a generational [`ShapeArena`] owned by the
//! [`PhysicsWorld`]. Everything else refers to them by [`ShapeHandle`].
//! Scenes receive their camera and input through a [`FrameContext`] every
//! frame and hand draw lists to a [`Renderer`]; nothing is global.

pub mod aabb;
pub mod arena;
pub mod camera;
pub mod clock;
pub mod config;
pub mod entity;
pub mod frame;
pub mod input;
pub mod player;
pub mod render;
pub mod scene;
pub mod shape;
pub mod showcase;
pub mod water;
pub mod world;

pub use aabb::Aabb;
pub use arena::{ShapeArena, ShapeHandle};
pub use camera::{CameraState, LookController};
pub use clock::FrameClock;
pub use config::{ConfigError, Settings};
pub use entity::{Behavior, Entity};
pub use frame::FrameContext;
pub use input::{Action, ActionSet, ActionState, InputSnapshot};
pub use player::{PlayerController, PlayerState, SpeedTier};
pub use render::{DrawItem, FrameLighting, RenderPass, Renderer};
pub use scene::{PhysicsDemoScene, Scene, SceneDirector, SceneError};
pub use shape::{RigidShape, ShapeKind};
pub use showcase::ShowcaseScene;
pub use water::{RippleBuffer, Water};
pub use world::PhysicsWorld;

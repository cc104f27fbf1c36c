// SPDX-License-Identifier: MIT OR Apache-2.0
//! Generational storage for scene shapes.
//!
//! Shapes are addressed by [`ShapeHandle`], a `slotmap` key, rather than
//! shared pointers. Clearing the arena on scene reload bumps every slot
//! version, so a handle kept from a previous load simply stops resolving.
//!
//! `SlotMap` hands freed slots back in reverse, so the arena keeps its own
//! insertion order. Iteration always walks shapes in the order they were
//! added.

use crate::shape::RigidShape;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable reference to a shape in a [`ShapeArena`]
    pub struct ShapeHandle;
}

/// Slot map of shapes, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct ShapeArena {
    shapes: SlotMap<ShapeHandle, RigidShape>,
    order: Vec<ShapeHandle>,
}

impl ShapeArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a shape and return its handle
    pub fn insert(&mut self, shape: RigidShape) -> ShapeHandle {
        let handle = self.shapes.insert(shape);
        self.order.push(handle);
        handle
    }

    /// Look up a shape; `None` for stale or foreign handles
    pub fn get(&self, handle: ShapeHandle) -> Option<&RigidShape> {
        self.shapes.get(handle)
    }

    /// Mutable lookup; `None` for stale or foreign handles
    pub fn get_mut(&mut self, handle: ShapeHandle) -> Option<&mut RigidShape> {
        self.shapes.get_mut(handle)
    }

    /// Remove a shape, invalidating its handle
    pub fn remove(&mut self, handle: ShapeHandle) -> Option<RigidShape> {
        let shape = self.shapes.remove(handle)?;
        self.order.retain(|h| *h != handle);
        Some(shape)
    }

    /// Drop every shape and invalidate all outstanding handles
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
    }

    /// True if `handle` currently resolves
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shapes.contains_key(handle)
    }

    /// Number of live shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if no shapes are stored
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Live shapes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ShapeHandle, &RigidShape)> {
        self.order
            .iter()
            .filter_map(|&handle| self.shapes.get(handle).map(|shape| (handle, shape)))
    }

    /// Handles of all live shapes in insertion order
    pub fn handles(&self) -> Vec<ShapeHandle> {
        self.order.clone()
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Axis-aligned bounding boxes.
//!
//! Every collision test in the engine goes through [`Aabb::overlaps`]. Boxes
//! never rotate: a shape's visual rotation is not reflected here.

use glam::Vec3;

/// Axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// World-space center
    pub center: Vec3,
    /// Half size along each axis (always positive for well-formed shapes)
    pub half_extents: Vec3,
}

impl Aabb {
    /// Create a box from its center and half extents
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box of a shape with the given world scale, centered at `center`
    pub fn from_scale(center: Vec3, scale: Vec3) -> Self {
        Self::new(center, scale * 0.5)
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Same box moved so that its center sits at `center`
    pub fn translated_to(&self, center: Vec3) -> Self {
        Self::new(center, self.half_extents)
    }

    /// Per-axis closed interval overlap.
    ///
    /// Touching faces count as overlapping.
    pub fn axis_overlap(&self, other: &Aabb) -> [bool; 3] {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        [
            a_max.x >= b_min.x && b_max.x >= a_min.x,
            a_max.y >= b_min.y && b_max.y >= a_min.y,
            a_max.z >= b_min.z && b_max.z >= a_min.z,
        ]
    }

    /// True when the boxes overlap on all three axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let [x, y, z] = self.axis_overlap(other);
        x && y && z
    }

    /// True if the point lies inside or on the surface of the box
    pub fn contains_point(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        point.cmpge(min).all() && point.cmple(max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_scale(Vec3::new(x, y, z), Vec3::ONE)
    }

    #[test]
    fn test_corners_from_scale() {
        let b = Aabb::from_scale(Vec3::new(0.0, -2.5, 0.0), Vec3::new(40.0, 0.1, 40.0));
        assert!(b.min().abs_diff_eq(Vec3::new(-20.0, -2.55, -20.0), 1e-5));
        assert!(b.max().abs_diff_eq(Vec3::new(20.0, -2.45, 20.0), 1e-5));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (unit_at(0.0, 0.0, 0.0), unit_at(0.5, 0.5, 0.5)),
            (unit_at(0.0, 0.0, 0.0), unit_at(2.0, 0.0, 0.0)),
            (unit_at(0.0, 0.0, 0.0), unit_at(0.0, 1.0, 0.0)),
            (
                Aabb::from_scale(Vec3::ZERO, Vec3::new(40.0, 0.1, 40.0)),
                unit_at(3.0, 0.3, -7.0),
            ),
        ];

        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn test_touching_faces_overlap() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(1.0, 0.0, 0.0);
        assert!(a.overlaps(&b));

        let c = unit_at(1.001, 0.0, 0.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_single_axis_separation_is_enough() {
        let a = unit_at(0.0, 0.0, 0.0);
        let b = unit_at(0.2, 5.0, 0.2);
        assert_eq!(a.axis_overlap(&b), [true, false, true]);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contains_point() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert!(a.contains_point(Vec3::new(0.5, -0.5, 0.0)));
        assert!(!a.contains_point(Vec3::new(0.51, 0.0, 0.0)));
    }
}

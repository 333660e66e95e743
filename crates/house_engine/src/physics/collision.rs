//! Axis-aligned bounding boxes

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    ///
    /// Corners are reordered per axis so `min <= max` always holds.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half extents of the AABB
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Same box moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Check if this AABB contains a point (boundary inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Touching faces count as intersecting.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_orders_corners() {
        let aabb = Aabb::new(Vec3::new(1.0, -1.0, 2.0), Vec3::new(-1.0, 1.0, 0.0));
        assert_relative_eq!(aabb.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_relative_eq!(aabb.max, Vec3::new(1.0, 1.0, 2.0));
        assert_relative_eq!(aabb.center(), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(aabb.half_extents(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_touching_boxes_intersect() {
        let a = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5));
        let b = a.translated(Vec3::new(1.0, 0.0, 0.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = a.translated(Vec3::new(1.01, 0.0, 0.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_contains_point_is_inclusive() {
        let aabb = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains_point(Vec3::new(1.0, 0.5, 0.0)));
        assert!(!aabb.contains_point(Vec3::new(1.1, 0.5, 0.0)));
    }
}

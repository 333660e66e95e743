//! Proximity trigger shared by doors, items and props

use crate::foundation::math::{horizontal_distance, Vec3};

/// "Is the player within `radius` of a target", measured on the X/Z plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityTrigger {
    /// Activation radius; the boundary itself is outside
    pub radius: f32,
}

impl ProximityTrigger {
    /// Create a trigger with the given radius
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Horizontal distance between the player and the target
    pub fn distance(player: &Vec3, target: &Vec3) -> f32 {
        horizontal_distance(player, target)
    }

    /// Whether the player is strictly inside the radius
    pub fn contains(&self, player: &Vec3, target: &Vec3) -> bool {
        Self::distance(player, target) < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_outside() {
        let trigger = ProximityTrigger::new(2.0);
        let target = Vec3::zeros();
        assert!(trigger.contains(&Vec3::new(1.99, 0.0, 0.0), &target));
        assert!(!trigger.contains(&Vec3::new(2.0, 0.0, 0.0), &target));
    }

    #[test]
    fn test_height_is_ignored() {
        let trigger = ProximityTrigger::new(1.5);
        assert!(trigger.contains(&Vec3::new(0.0, 3.5, 1.0), &Vec3::new(0.0, -1.0, 0.0)));
    }
}

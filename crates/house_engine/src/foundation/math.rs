//! Math utilities and types
//!
//! Vector aliases over nalgebra plus the horizontal-plane helpers used by
//! proximity checks and first-person movement.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// World up axis (+Y)
pub fn up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Direction the corridor runs in; players walk towards -Z
pub fn corridor_forward() -> Vec3 {
    Vec3::new(0.0, 0.0, -1.0)
}

/// Distance between two points ignoring height
///
/// Vertical offsets (camera height vs. a door's pivot, different floor
/// levels) never matter for "standing near something".
pub fn horizontal_distance(a: &Vec3, b: &Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Camera forward vector for a yaw angle (radians about +Y)
///
/// Yaw zero looks down -Z, matching the camera convention of the scene
/// collaborator.
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Camera left vector for a yaw angle (`up × forward`)
pub fn left_from_yaw(yaw: f32) -> Vec3 {
    up().cross(&forward_from_yaw(yaw))
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

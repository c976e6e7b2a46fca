//! Lumen Math - vector, color and ray types shared by every Lumen crate.
//!
//! Vectors are glam's double precision `DVec3`. Shadow tests compare
//! distances against a `1e-7` tolerance, which `f32` cannot resolve at
//! ordinary scene scales.

// Re-export the glam types we build on
pub use glam::{dvec3, DVec3};

/// World-space vector / point type used throughout Lumen.
pub type Vec3 = DVec3;

mod color;
mod interval;
mod ray;
mod vector;

pub use color::{legalize, Color};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::normalize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }
}

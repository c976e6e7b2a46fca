//! Ray/disk intersection.

use crate::hittable::{Hittable, PARALLEL_EPSILON};
use lumen_core::{Disk, Material};
use lumen_math::{Interval, Ray, Vec3};

impl Hittable for Disk {
    /// Intersect the disk's plane, then clip to `radius` around the center.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        // n . (e + t*d) + D = 0, with D = -n . c
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let plane_d = -self.normal.dot(self.pos);
        let t = -(self.normal.dot(ray.origin()) + plane_d) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let distance = (ray.at(t) - self.pos).length();
        (distance <= self.radius).then_some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_disk_hit() {
        let disk = Disk::new(Vec3::ZERO, 2.0, Vec3::Z, Material::default());

        let t = disk.hit(&down_z(), Interval::FORWARD).unwrap();
        assert!((t - 5.0).abs() < 1e-12);
        assert_eq!(disk.normal_at(down_z().at(t)), Vec3::Z);
    }

    #[test]
    fn test_disk_offset_miss() {
        let disk = Disk::new(Vec3::new(10.0, 0.0, 0.0), 0.5, Vec3::Z, Material::default());
        assert_eq!(disk.hit(&down_z(), Interval::FORWARD), None);
    }

    #[test]
    fn test_disk_edge_is_inclusive() {
        let disk = Disk::new(Vec3::new(2.0, 0.0, 0.0), 2.0, Vec3::Z, Material::default());
        assert!(disk.hit(&down_z(), Interval::FORWARD).is_some());
    }

    #[test]
    fn test_back_face_hit_keeps_normal() {
        // Normal faces away from the ray; the disk is still hit and the
        // normal is not flipped toward the viewer
        let disk = Disk::new(Vec3::ZERO, 2.0, Vec3::NEG_Z, Material::default());

        assert!(disk.hit(&down_z(), Interval::FORWARD).is_some());
        assert_eq!(disk.normal_at(Vec3::ZERO), Vec3::NEG_Z);
    }

    #[test]
    fn test_disk_behind_origin() {
        let disk = Disk::new(Vec3::new(0.0, 0.0, 6.0), 2.0, Vec3::Z, Material::default());
        assert_eq!(disk.hit(&down_z(), Interval::FORWARD), None);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let disk = Disk::new(Vec3::ZERO, 100.0, Vec3::Z, Material::default());
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert_eq!(disk.hit(&ray, Interval::FORWARD), None);
    }

    #[test]
    fn test_tilted_disk() {
        let normal = Vec3::new(0.0, 1.0, 1.0);
        let disk = Disk::new(Vec3::ZERO, 1.0, normal, Material::default());

        let t = disk.hit(&down_z(), Interval::FORWARD).unwrap();
        assert!((t - 5.0).abs() < 1e-12);
        assert!((disk.normal.length() - 1.0).abs() < 1e-12);
    }
}

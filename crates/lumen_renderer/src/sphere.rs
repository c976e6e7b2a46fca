//! Ray/sphere intersection.

use crate::hittable::Hittable;
use lumen_core::{Material, Sphere};
use lumen_math::{normalize, Interval, Ray, Vec3};

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        // |e + t*d - c|^2 = R^2
        let ec = ray.origin() - self.pos;
        let a = ray.direction().length_squared();
        let b = ray.direction().dot(ec);
        let c = ec.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(root)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        normalize(point - self.pos)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

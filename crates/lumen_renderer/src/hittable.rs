//! Hittable trait, hit records and the scene-wide intersection queries.

use lumen_core::{Material, Scene};
use lumen_math::{Interval, Ray, Vec3};

/// How far an occluder may sit "behind" the lit point before it counts as
/// shadowing it. Absorbs the round-off of re-intersecting the lit surface
/// itself.
pub const SHADOW_EPSILON: f64 = 1e-7;

/// Below this `|n · d|` a ray is treated as parallel to a disk's plane.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Which primitive a hit came from, by position in its scene collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Sphere(usize),
    Disk(usize),
}

/// Record of the closest ray-primitive intersection.
///
/// Everything shading needs is resolved here, so no caller has to look
/// the primitive up again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal (sphere: outward; disk: as authored, never flipped)
    pub normal: Vec3,
    pub material: Material,
    pub surface: Surface,
}

/// Trait for primitives that can be hit by rays.
pub trait Hittable {
    /// Ray parameter of the nearest intersection strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64>;

    /// Surface normal at a point on the primitive.
    fn normal_at(&self, point: Vec3) -> Vec3;

    fn material(&self) -> &Material;
}

/// Nearest hit among `objects`, as (index, t).
fn nearest<H: Hittable>(objects: &[H], ray: &Ray, ray_t: Interval) -> Option<(usize, f64)> {
    let mut closest = None;
    let mut closest_so_far = ray_t.max;

    for (index, object) in objects.iter().enumerate() {
        if let Some(t) = object.hit(ray, ray_t.with_max(closest_so_far)) {
            closest = Some((index, t));
            closest_so_far = t;
        }
    }

    closest
}

fn record<H: Hittable>(object: &H, surface: Surface, ray: &Ray, t: f64) -> HitRecord {
    let point = ray.at(t);
    HitRecord {
        t,
        point,
        normal: object.normal_at(point),
        material: *object.material(),
        surface,
    }
}

/// Find the closest primitive in front of the ray origin.
///
/// Spheres are scanned before disks; on an exact tie in `t` the earlier
/// primitive wins.
pub fn closest_hit(scene: &Scene, ray: &Ray) -> Option<HitRecord> {
    let sphere = nearest(&scene.spheres, ray, Interval::FORWARD);
    let limit = sphere.map_or(f64::INFINITY, |(_, t)| t);
    let disk = nearest(&scene.disks, ray, Interval::FORWARD.with_max(limit));

    match (sphere, disk) {
        (_, Some((index, t))) => Some(record(&scene.disks[index], Surface::Disk(index), ray, t)),
        (Some((index, t)), None) => {
            Some(record(&scene.spheres[index], Surface::Sphere(index), ray, t))
        }
        (None, None) => None,
    }
}

/// Distance to the nearest primitive along a unit-length ray.
///
/// Returns `f64::INFINITY` when nothing is hit. Used for shadow rays, where
/// only occlusion matters.
pub fn nearest_distance(scene: &Scene, ray: &Ray) -> f64 {
    let sphere = nearest(&scene.spheres, ray, Interval::FORWARD);
    let limit = sphere.map_or(f64::INFINITY, |(_, t)| t);
    let disk = nearest(&scene.disks, ray, Interval::FORWARD.with_max(limit));

    disk.or(sphere).map_or(f64::INFINITY, |(_, t)| t)
}

/// Whether something blocks the straight path from `light` to `point`.
///
/// The shadow ray is cast from the light toward the point; the point is
/// shadowed when the first hit is more than [`SHADOW_EPSILON`] closer to the
/// light than the point itself.
pub fn occluded(scene: &Scene, light: Vec3, point: Vec3) -> bool {
    let to_point = point - light;
    let shadow_ray = Ray::new(light, lumen_math::normalize(to_point));
    to_point.length() - nearest_distance(scene, &shadow_ray) > SHADOW_EPSILON
}

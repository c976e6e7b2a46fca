//! Scene model for Lumen.
//!
//! Flat, insertion-ordered collections of primitives and lights plus the
//! camera frame, background and ambient settings. Nothing references
//! anything else; a primitive's identity is its position in its collection.

use lumen_math::{normalize, Color, Vec3};

/// Field of view (degrees) of a freshly reset scene.
pub const DEFAULT_FOV: f64 = 90.0;

/// Background color of a freshly reset scene.
pub const DEFAULT_BACKGROUND: Color = Color::GREY;

/// Phong-style surface terms shared by every primitive kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color (k_d)
    pub color: Color,

    /// Ambient coefficient (k_a)
    pub k_ambient: f64,

    /// Specular coefficient (k_s), applied equally to all channels
    pub k_specular: f64,

    /// Specular exponent
    pub specular_pow: f64,
}

impl Material {
    pub fn new(color: Color, k_ambient: f64, k_specular: f64, specular_pow: f64) -> Self {
        Self {
            color,
            k_ambient,
            k_specular,
            specular_pow,
        }
    }

    /// A purely diffuse material with no ambient or specular response.
    pub fn diffuse(color: Color) -> Self {
        Self::new(color, 0.0, 0.0, 1.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::GREY)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub pos: Vec3,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(pos: Vec3, radius: f64, material: Material) -> Self {
        Self {
            pos,
            radius,
            material,
        }
    }
}

/// A flat disk: the plane through `pos` with `normal`, clipped to `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub pos: Vec3,
    pub radius: f64,
    /// Unit normal, kept in the orientation the caller gave
    pub normal: Vec3,
    pub material: Material,
}

impl Disk {
    /// Create a new disk. `normal` is normalized but never flipped.
    pub fn new(pos: Vec3, radius: f64, normal: Vec3, material: Material) -> Self {
        if normal.length_squared() == 0.0 {
            log::warn!("Disk at {pos:?} has a zero-length normal; it will never be hit");
        }

        Self {
            pos,
            radius,
            normal: normalize(normal),
            material,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub pos: Vec3,
}

impl PointLight {
    pub fn new(color: Color, pos: Vec3) -> Self {
        Self { color, pos }
    }
}

/// A rectangular light covering `pos + s*u + t*v` for `s, t` in `[-1, 1]`.
///
/// `u` and `v` are half-edge vectors measured from the center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaLight {
    pub color: Color,
    pub pos: Vec3,
    pub u: Vec3,
    pub v: Vec3,
}

impl AreaLight {
    pub fn new(color: Color, pos: Vec3, u: Vec3, v: Vec3) -> Self {
        Self { color, pos, u, v }
    }

    /// Map a unit-square sample onto the light's rectangle.
    ///
    /// `(0.5, 0.5)` is the center; the corners of the unit square land on the
    /// corners of the rectangle.
    #[inline]
    pub fn point_at(&self, s: f64, t: f64) -> Vec3 {
        self.pos + (2.0 * s - 1.0) * self.u + (2.0 * t - 1.0) * self.v
    }
}

/// Camera frame: an orthonormal basis plus the eye position.
///
/// `w` is the *backward* view axis (it points from the look-at point toward
/// the eye). `v` is `cross(u, w)`, which points down the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eye {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
    pub pos: Vec3,
}

impl Eye {
    /// Build the frame for a camera at `from` looking at `at`.
    ///
    /// `up` only needs to be roughly up: `v` is recomputed from `u` and `w`,
    /// so the basis is orthonormal even when `up` is not perpendicular to
    /// the view direction.
    pub fn look_at(from: Vec3, at: Vec3, up: Vec3) -> Self {
        let w = normalize(-(at - from));
        let u = normalize(up.cross(w));
        let v = normalize(u.cross(w));

        if !u.is_finite() {
            log::warn!(
                "Camera up vector {up:?} is parallel to the view direction; the image will be blank"
            );
        }

        Self { u, v, w, pos: from }
    }
}

impl Default for Eye {
    fn default() -> Self {
        Self::look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
    }
}

/// A complete scene: primitives, lights, camera and environment.
///
/// `Scene::default()` is the reset state: no primitives or lights, default
/// camera and field of view, grey background and no ambient light.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,

    pub disks: Vec<Disk>,

    pub point_lights: Vec<PointLight>,

    pub area_lights: Vec<AreaLight>,

    /// Ambient light color, `None` when ambient lighting is off
    pub ambient: Option<Color>,

    /// Color of rays that hit nothing
    pub background: Color,

    pub eye: Eye,

    /// Field of view in degrees
    pub fov: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            spheres: Vec::new(),
            disks: Vec::new(),
            point_lights: Vec::new(),
            area_lights: Vec::new(),
            ambient: None,
            background: DEFAULT_BACKGROUND,
            eye: Eye::default(),
            fov: DEFAULT_FOV,
        }
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every collection and restore the default camera, background and
    /// ambient state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_disk(&mut self, disk: Disk) {
        self.disks.push(disk);
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn add_area_light(&mut self, light: AreaLight) {
        self.area_lights.push(light);
    }

    /// Turn on (or replace) the ambient light.
    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = Some(color);
    }

    pub fn clear_ambient(&mut self) {
        self.ambient = None;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Place the camera at `from`, looking at `at`.
    pub fn set_eye(&mut self, from: Vec3, at: Vec3, up: Vec3) {
        self.eye = Eye::look_at(from, at, up);
    }

    /// Set the field of view in degrees.
    pub fn set_fov(&mut self, degrees: f64) {
        self.fov = degrees;
    }

    /// Total number of primitives (spheres and disks).
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.disks.len()
    }

    /// Total number of lights, not counting ambient.
    pub fn light_count(&self) -> usize {
        self.point_lights.len() + self.area_lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(eye: &Eye) {
        let eps = 1e-12;
        for axis in [eye.u, eye.v, eye.w] {
            assert!((axis.length() - 1.0).abs() < eps, "{axis:?} is not unit");
        }
        assert!(eye.u.dot(eye.v).abs() < eps);
        assert!(eye.u.dot(eye.w).abs() < eps);
        assert!(eye.v.dot(eye.w).abs() < eps);
    }

    fn populated() -> Scene {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::default()));
        scene.add_disk(Disk::new(Vec3::NEG_Y, 3.0, Vec3::Y, Material::default()));
        scene.add_point_light(PointLight::new(Color::WHITE, Vec3::new(0.0, 5.0, 0.0)));
        scene.add_area_light(AreaLight::new(Color::WHITE, Vec3::Y, Vec3::X, Vec3::Z));
        scene.set_ambient(Color::splat(0.2));
        scene.set_background(Color::BLACK);
        scene.set_eye(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y);
        scene.set_fov(45.0);
        scene
    }

    #[test]
    fn test_default_eye() {
        let eye = Eye::default();

        assert_eq!(eye.pos, Vec3::ZERO);
        assert_eq!(eye.w, Vec3::Z);
        assert_eq!(eye.u, Vec3::X);
        assert_eq!(eye.v, Vec3::NEG_Y);
    }

    #[test]
    fn test_eye_orthonormal_with_skewed_up() {
        // Up vector deliberately not perpendicular to the view direction
        let eye = Eye::look_at(
            Vec3::new(3.0, 4.0, 5.0),
            Vec3::new(-1.0, 0.5, 0.0),
            Vec3::new(0.3, 1.0, 0.7),
        );

        assert_orthonormal(&eye);
        assert_eq!(eye.pos, Vec3::new(3.0, 4.0, 5.0));
        // w points back toward the eye
        assert!(eye.w.dot(Vec3::new(3.0, 4.0, 5.0) - Vec3::new(-1.0, 0.5, 0.0)) > 0.0);
    }

    #[test]
    fn test_eye_parallel_up_is_degenerate() {
        let eye = Eye::look_at(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(!eye.u.is_finite());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut scene = Scene::new();
        for i in 0..4 {
            scene.add_sphere(Sphere::new(
                Vec3::new(i as f64, 0.0, 0.0),
                1.0,
                Material::default(),
            ));
        }

        let xs: Vec<f64> = scene.spheres.iter().map(|s| s.pos.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(scene.primitive_count(), 4);
    }

    #[test]
    fn test_reset_idempotence() {
        let mut empty = Scene::new();
        empty.reset();

        let mut full = populated();
        assert_eq!(full.primitive_count(), 2);
        assert_eq!(full.light_count(), 2);
        full.reset();

        assert_eq!(empty, full);
        assert_eq!(full, Scene::default());
        assert!(full.is_empty());
        assert_eq!(full.ambient, None);
        assert_eq!(full.background, DEFAULT_BACKGROUND);
        assert_eq!(full.fov, DEFAULT_FOV);
    }

    #[test]
    fn test_disk_normal_is_normalized_not_flipped() {
        let disk = Disk::new(Vec3::ZERO, 1.0, Vec3::new(0.0, 0.0, -4.0), Material::default());
        assert_eq!(disk.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_area_light_point_at() {
        let light = AreaLight::new(
            Color::WHITE,
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );

        assert_eq!(light.point_at(0.5, 0.5), light.pos);
        assert_eq!(light.point_at(0.0, 0.0), Vec3::new(-2.0, 5.0, -1.0));
        assert_eq!(light.point_at(1.0, 1.0), Vec3::new(2.0, 5.0, 1.0));
        assert_eq!(light.point_at(0.75, 0.25), Vec3::new(1.0, 5.0, -0.5));
    }
}

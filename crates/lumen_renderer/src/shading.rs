//! Direct-lighting shading evaluation.
//!
//! Phong-style lighting from an ambient term, point lights with hard
//! shadows and rectangular area lights with sampled soft shadows. Two quirks
//! are kept on purpose: the diffuse term is not clamped at zero, so
//! back-facing lights subtract, and an area light's highlight comes from its
//! single brightest sample instead of an average.

use crate::hittable::{closest_hit, occluded, HitRecord};
use crate::{RenderConfig, Sample};
use lumen_core::{AreaLight, PointLight, Scene};
use lumen_math::{normalize, Color, Ray, Vec3};
use rand::RngCore;

/// Diffuse and specular response to one light position.
#[derive(Debug, Clone, Copy)]
struct LightTerms {
    diffuse: Color,
    specular: Color,
}

/// Evaluate the Phong terms at `hit` for a light at `light_pos`.
///
/// `view` is the unit vector from the hit point back toward the viewer.
fn light_terms(hit: &HitRecord, view: Vec3, light_pos: Vec3) -> LightTerms {
    let material = &hit.material;
    let n = hit.normal;
    let l = normalize(light_pos - hit.point);

    let reflected = normalize(2.0 * l.dot(n) * n - l);
    let highlight = if reflected.dot(l) <= 0.0 {
        0.0
    } else {
        reflected.dot(view).max(0.0)
    };

    LightTerms {
        diffuse: n.dot(l) * material.color,
        specular: Color::splat(material.k_specular * highlight.powf(material.specular_pow)),
    }
}

/// Contribution of one point light, zero when it is shadowed.
fn point_light(
    scene: &Scene,
    hit: &HitRecord,
    view: Vec3,
    light: &PointLight,
    config: &RenderConfig,
) -> Color {
    if config.shadows && occluded(scene, light.pos, hit.point) {
        return Color::BLACK;
    }

    let terms = light_terms(hit, view, light.pos);
    light.color * (terms.diffuse + terms.specular)
}

/// Contribution of one area light integrated over `samples`.
///
/// Diffuse is averaged over every sample, shadowed samples counting as zero,
/// which gives a penumbra proportional to the occluded fraction. Specular is
/// the brightest highlight over all samples, shadowed or not.
fn area_light(
    scene: &Scene,
    hit: &HitRecord,
    view: Vec3,
    light: &AreaLight,
    samples: &[Sample],
    config: &RenderConfig,
) -> Color {
    let mut diffuse = Color::BLACK;
    let mut specular = Color::BLACK;

    for sample in samples {
        let light_pos = light.point_at(sample.s, sample.t);
        let terms = light_terms(hit, view, light_pos);

        if !(config.shadows && occluded(scene, light_pos, hit.point)) {
            diffuse += terms.diffuse;
        }
        if terms.specular.lightness() > specular.lightness() {
            specular = terms.specular;
        }
    }

    light.color * (diffuse / samples.len() as f64 + specular)
}

/// Accumulate all lighting at a resolved hit.
pub fn illuminate(
    scene: &Scene,
    ray: &Ray,
    hit: &HitRecord,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let material = &hit.material;
    let view = normalize(-ray.direction());
    let mut color = Color::BLACK;

    if let Some(ambient) = scene.ambient {
        color += material.k_ambient * ambient * material.color;
    }

    for light in &scene.point_lights {
        color += point_light(scene, hit, view, light, config);
    }

    if !scene.area_lights.is_empty() {
        // One sample set per shading call, shared by every area light
        let samples = config.distribution().generate(rng);
        for light in &scene.area_lights {
            color += area_light(scene, hit, view, light, &samples, config);
        }
    }

    color
}

/// Compute the linear color seen along `ray`.
///
/// `depth` is the recursion level of the ray (0 for eye rays). Rays deeper
/// than `config.max_depth` contribute black; secondary rays are not spawned
/// yet, so primary rays always shade normally.
pub fn shade(
    scene: &Scene,
    ray: &Ray,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth > config.max_depth {
        return Color::BLACK;
    }

    match closest_hit(scene, ray) {
        Some(hit) => illuminate(scene, ray, &hit, config, rng),
        None => scene.background,
    }
}

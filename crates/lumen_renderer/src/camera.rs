//! Camera for eye-ray generation.

use crate::{RenderConfig, Sample};
use lumen_core::{Eye, Scene};
use lumen_math::{normalize, Ray, Vec3};

/// Thin-lens settings for depth of field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthOfField {
    /// Half-width of the square aperture, in world units
    pub lens_size: f64,
    /// Distance along each eye ray to the plane in perfect focus
    pub focal_distance: f64,
}

/// Maps fractional pixel coordinates to world-space rays.
///
/// Rays are traced on the logical `screen_width x screen_height` grid; the
/// physical image size only contributes the aspect ratio.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Eye,
    screen_width: f64,
    screen_height: f64,
    /// Physical height / width
    aspect: f64,
    /// Signed distance to the image plane along `w` (always negative)
    plane_distance: f64,
    depth_of_field: Option<DepthOfField>,
}

impl Camera {
    /// Set up a camera for `scene` at the resolutions in `config`.
    pub fn new(scene: &Scene, config: &RenderConfig) -> Self {
        Self {
            eye: scene.eye,
            screen_width: config.screen_width as f64,
            screen_height: config.screen_height as f64,
            aspect: config.image_height as f64 / config.image_width as f64,
            plane_distance: -1.0 / (scene.fov.to_radians() / 2.0).tan(),
            depth_of_field: config.depth_of_field,
        }
    }

    /// Camera position.
    pub fn position(&self) -> Vec3 {
        self.eye.pos
    }

    /// Generate the pinhole ray through pixel `(i, j)`.
    ///
    /// `i` and `j` are fractional so that sub-pixel samples can be passed
    /// straight through. The direction is always unit length and the origin
    /// is always the eye position.
    pub fn ray(&self, i: f64, j: f64) -> Ray {
        let us = -1.0 + 2.0 * i / self.screen_width + 1.0 / self.screen_width;
        let vs = (-1.0 + 2.0 * j / self.screen_height + 1.0 / self.screen_height) * self.aspect;

        let dir = us * self.eye.u + vs * self.eye.v + self.plane_distance * self.eye.w;
        Ray::new(self.eye.pos, normalize(dir))
    }

    /// Generate a ray through pixel `(i, j)` that starts on the lens.
    ///
    /// `lens` picks the point on the square aperture. Without depth of field
    /// this is the pinhole ray. With it, the origin moves across the
    /// aperture and the ray is re-aimed at the point where the pinhole ray
    /// crosses the focal distance, so only geometry at that distance stays
    /// sharp.
    pub fn lens_ray(&self, i: f64, j: f64, lens: Sample) -> Ray {
        let pinhole = self.ray(i, j);
        let Some(dof) = self.depth_of_field else {
            return pinhole;
        };

        let focus = pinhole.at(dof.focal_distance);
        let origin = self.eye.pos
            + (2.0 * lens.s - 1.0) * dof.lens_size * self.eye.u
            + (2.0 * lens.t - 1.0) * dof.lens_size * self.eye.v;

        Ray::new(origin, normalize(focus - origin))
    }

    pub fn depth_of_field(&self) -> Option<DepthOfField> {
        self.depth_of_field
    }
}

//! Lumen Renderer - CPU Whitted-style distribution ray tracing
//!
//! Direct lighting from point and area lights with hard and sampled soft
//! shadows, stratified antialiasing and a bucketed parallel frame driver.

mod bucket;
mod camera;
mod disk;
mod hittable;
mod renderer;
mod sampler;
mod shading;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, DepthOfField};
pub use hittable::{
    closest_hit, nearest_distance, occluded, HitRecord, Hittable, Surface, PARALLEL_EPSILON,
    SHADOW_EPSILON,
};
pub use renderer::{render, render_pixel, write_pixel, ImageBuffer, RenderConfig, CLEAR_COLOR};
pub use sampler::{Distribution, Sample};
pub use shading::{illuminate, shade};

/// Re-export the math types callers need alongside the renderer
pub use lumen_math::{Color, Ray, Vec3};

//! Lumen Core - scene model and scene descriptions.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Sphere`, `Disk`, `PointLight`, `AreaLight`, `Eye`
//! - **Scene descriptions**: JSON files that replay authoring calls
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_description;
//!
//! let description = load_description("scene.json")?;
//! let scene = description.build_scene();
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.light_count());
//! ```

pub mod description;
pub mod scene;

// Re-export commonly used types
pub use description::{
    load_description, parse_description, Command, DescriptionError, DescriptionResult,
    LensOptions, RenderOptions, SceneDescription,
};
pub use scene::{AreaLight, Disk, Eye, Material, PointLight, Scene, Sphere};

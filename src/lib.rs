pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod materials;
pub mod primatives;
pub mod render;
pub mod render_objects;
pub mod tracer;
pub mod vector;

pub use camera::Camera;
pub use error::{Error, Result};
pub use materials::{LightWeights, Material};
pub use primatives::{Ray, Sphere};
pub use render_objects::{Hittable, Intersection, Scene};
pub use vector::{Color, Optics, Vector3};

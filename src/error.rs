use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Scene parse error: {0}")]
    SceneParse(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Sphere {sphere} uses unknown material \"{material}\"")]
    UnknownMaterial { sphere: usize, material: String },

    #[error("Invalid material \"{name}\": {reason}")]
    InvalidMaterial { name: String, reason: &'static str },

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: &'static str },

    #[error("Background color must be finite")]
    InvalidBackground,

    #[error("Invalid camera: {0}")]
    InvalidCamera(&'static str),

    #[error("Invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;

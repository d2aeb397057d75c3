use thiserror::Error;

/// Errors raised when allocating a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Errors raised while loading or storing editor settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading stamp images.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("Failed to load stamp image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Stamp image is empty")]
    Empty,
}

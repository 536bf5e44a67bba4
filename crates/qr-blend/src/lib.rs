//! Blend a scannable QR code into a background photo.
//!
//! Instead of stamping flat black-and-white squares over the image, the
//! pipeline samples the photo under the code and darkens the regions covered
//! by dark modules, so the code reads as shaded picture texture. The quiet
//! zone is whitened and the three finder patterns are repainted at full
//! contrast so scanners can still lock on.
//!
//! Stages run strictly forward: matrix generation, layout planning, per-module
//! blending, quiet-zone normalization, finder forcing, composition.

pub mod blend;
pub mod compose;
pub mod finder;
pub mod layout;
pub mod matrix;
pub mod options;
pub mod pipeline;
pub mod quiet_zone;

// Re-exports for convenience
pub use layout::Layout;
pub use matrix::QrMatrix;
pub use options::BlendOptions;
pub use pipeline::{blend_qr_into, run};

use std::path::PathBuf;

/// Error-correction level used for every generated code.
///
/// Level H tolerates the most module occlusion, which the blended rendering
/// trades on.
pub const EC_LEVEL: qrcode::EcLevel = qrcode::EcLevel::H;

/// Errors that can occur while blending a QR code into a photo.
#[derive(Debug, thiserror::Error)]
pub enum BlendError {
    #[error("payload cannot be encoded at correction level H: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    #[error("failed to load background image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("invalid layout configuration: {0}")]
    Layout(String),

    #[error("failed to write output image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, BlendError>;

//! Runs the whole chain: encode, plan, blend, normalize, force, paste.
//!
//! Each stage hands a value to the next; nothing reaches back. The
//! in-memory entry point is [`blend_qr_into`], and [`run`] wraps it with
//! file loading and saving.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::info;

use crate::options::BlendOptions;
use crate::{BlendError, EC_LEVEL, Result, blend, compose, finder, layout, matrix, quiet_zone};

/// Blend a QR code carrying `payload` into `background` and return the
/// composited image. The background itself is untouched.
pub fn blend_qr_into(
    background: &RgbaImage,
    payload: &str,
    options: &BlendOptions,
) -> Result<RgbaImage> {
    let matrix = matrix::generate(payload, EC_LEVEL, options.quiet_zone_modules)?;
    let layout = layout::plan(
        background.width(),
        background.height(),
        matrix.size(),
        options.qr_relative_size,
        options.module_px_override,
    )?;

    let mut patch = blend::build_patch(background, &layout, &matrix, options.dark_patch_strength);
    quiet_zone::normalize(&mut patch, &layout, &matrix);
    if options.finder_force_contrast {
        finder::force_all(&mut patch, &layout, &matrix);
    }

    let mut output = background.clone();
    let patch = compose::patch_to_rgba8(&patch);
    compose::overlay(&mut output, &patch, layout.origin_x, layout.origin_y);
    if options.debug_outline {
        compose::draw_debug_outline(&mut output, &layout);
    }
    Ok(output)
}

/// Load the background from `background_path`, blend the QR code in, and
/// save the result to `options.output_path`. Returns the written path.
pub fn run(background_path: &Path, payload: &str, options: &BlendOptions) -> Result<PathBuf> {
    info!(path = %background_path.display(), "Loading background image");
    let background = image::open(background_path)
        .map_err(|source| BlendError::ImageLoad {
            path: background_path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let output = blend_qr_into(&background, payload, options)?;

    output
        .save(&options.output_path)
        .map_err(|source| BlendError::Io {
            path: options.output_path.clone(),
            source,
        })?;
    info!(path = %options.output_path.display(), "Saved composited image");
    Ok(options.output_path.clone())
}

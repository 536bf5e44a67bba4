//! QR sizing and placement against a background.

use tracing::{debug, warn};

use crate::{BlendError, Result};

/// Minimum module edge in pixels; below this modules stop scanning reliably.
pub const MIN_MODULE_PX: u32 = 2;

/// Pixel-space placement plan for one QR square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Edge of one module in pixels.
    pub module_px: u32,
    /// Edge of the whole QR square in pixels (`module_px` times matrix size).
    pub qr_px: u32,
    /// Left edge of the QR square on the background; negative when the
    /// square overhangs the background.
    pub origin_x: i64,
    /// Top edge of the QR square, same convention as `origin_x`.
    pub origin_y: i64,
}

/// Compute module size and centered placement for a matrix of `matrix_size`
/// modules on a `bg_w` x `bg_h` background.
///
/// The module edge is `round(floor(min_side * ratio) / matrix_size)` clamped
/// to [`MIN_MODULE_PX`], or the caller's override. The QR square may end up
/// larger than the background; the origin then goes negative and the
/// compositor clips at paste time.
pub fn plan(
    bg_w: u32,
    bg_h: u32,
    matrix_size: usize,
    ratio: f32,
    module_px_override: Option<u32>,
) -> Result<Layout> {
    if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
        return Err(BlendError::Layout(format!(
            "relative size must be in (0, 1], got {ratio}"
        )));
    }

    let min_side = bg_w.min(bg_h);
    let target_px = (min_side as f32 * ratio).floor() as u32;
    let computed = (target_px as f32 / matrix_size as f32).round() as u32;

    let wanted = module_px_override.unwrap_or(computed);
    let module_px = wanted.max(MIN_MODULE_PX);
    if module_px != wanted {
        warn!(wanted, module_px, "Module size clamped to scannable minimum");
    }

    let qr_px = module_px
        .checked_mul(matrix_size as u32)
        .ok_or_else(|| BlendError::Layout(format!(
            "module size {module_px} overflows a {matrix_size}-module grid"
        )))?;
    let origin_x = (i64::from(bg_w) - i64::from(qr_px)).div_euclid(2);
    let origin_y = (i64::from(bg_h) - i64::from(qr_px)).div_euclid(2);

    debug!(
        target_px,
        module_px,
        qr_px,
        origin_x,
        origin_y,
        "Planned QR placement"
    );

    Ok(Layout {
        module_px,
        qr_px,
        origin_x,
        origin_y,
    })
}

//! Per-module blending of the QR grid into sampled background texture.
//!
//! Dark modules keep the photo's color and detail, only multiplied toward
//! black; light modules pass the photo through untouched. The contrast
//! between the two is what a scanner's binarization threshold picks up.

use image::{Rgba, Rgba32FImage, RgbaImage};
use imageproc::filter::gaussian_blur_f32;
use tracing::debug;

use crate::layout::Layout;
use crate::matrix::QrMatrix;

/// Blur sigma applied to the sampled background before blending, to smooth
/// module edges and hide pixel-level noise.
const BLEND_BLUR_SIGMA: f32 = 1.0;

/// Build the floating-point QR patch for `matrix` over `background`.
///
/// The patch starts fully transparent. Background pixels under the QR square
/// are sampled (regions past the image edge stay transparent), blurred, and
/// copied per module: unchanged for light modules, RGB multiplied by
/// `1 - strength` for dark ones. Alpha is carried through untouched.
pub fn build_patch(
    background: &RgbaImage,
    layout: &Layout,
    matrix: &QrMatrix,
    strength: f32,
) -> Rgba32FImage {
    let dark_factor = 1.0 - strength.clamp(0.0, 1.0);
    let size = layout.qr_px;

    let area = sample_region(background, layout);
    let area = gaussian_blur_f32(&area, BLEND_BLUR_SIGMA);

    let mut patch = Rgba32FImage::new(size, size);
    let n = matrix.size();
    for row in 0..n {
        for col in 0..n {
            let dark = matrix.is_dark(col, row);
            let x0 = col as u32 * layout.module_px;
            let y0 = row as u32 * layout.module_px;
            for y in y0..y0 + layout.module_px {
                for x in x0..x0 + layout.module_px {
                    let Rgba([r, g, b, a]) = *area.get_pixel(x, y);
                    let mut px = [
                        f32::from(r) / 255.0,
                        f32::from(g) / 255.0,
                        f32::from(b) / 255.0,
                        f32::from(a) / 255.0,
                    ];
                    if dark {
                        px[0] *= dark_factor;
                        px[1] *= dark_factor;
                        px[2] *= dark_factor;
                    }
                    patch.put_pixel(x, y, Rgba(px));
                }
            }
        }
    }

    debug!(
        size,
        modules = n,
        dark_factor,
        "Blended module grid into background sample"
    );
    patch
}

/// Copy the background pixels under the QR square into a patch-sized buffer.
///
/// Pixels that fall outside the background (negative origin or overhang)
/// are left transparent black, so sampling near image boundaries clips
/// instead of failing.
fn sample_region(background: &RgbaImage, layout: &Layout) -> RgbaImage {
    let size = layout.qr_px;
    let mut area = RgbaImage::new(size, size);
    for dy in 0..size {
        let sy = layout.origin_y + i64::from(dy);
        if sy < 0 || sy >= i64::from(background.height()) {
            continue;
        }
        for dx in 0..size {
            let sx = layout.origin_x + i64::from(dx);
            if sx < 0 || sx >= i64::from(background.width()) {
                continue;
            }
            area.put_pixel(dx, dy, *background.get_pixel(sx as u32, sy as u32));
        }
    }
    area
}

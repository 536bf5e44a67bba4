//! Forces the quiet-zone ring of a blended patch to near-white.
//!
//! Blending keeps background texture everywhere, including the border the
//! QR standard wants empty. Scanners need that ring light regardless of the
//! photo behind it, so it is overwritten after blending rather than blended
//! itself.

use image::Rgba32FImage;
use tracing::debug;

use crate::layout::Layout;
use crate::matrix::QrMatrix;

/// Near-white level written into the quiet zone. Slightly below full white
/// so the ring does not look pasted onto darker photos.
const QUIET_ZONE_LEVEL: f32 = 0.97;

/// Overwrite the quiet-zone ring of `patch` with near-white.
///
/// The ring is `quiet_zone * module_px` pixels wide on all four sides.
/// Only RGB is replaced; alpha keeps whatever the blend produced, so
/// clipped regions of the patch stay transparent.
pub fn normalize(patch: &mut Rgba32FImage, layout: &Layout, matrix: &QrMatrix) {
    let ring = matrix.quiet_zone() * layout.module_px;
    if ring == 0 {
        return;
    }

    let (w, h) = patch.dimensions();
    for y in 0..h {
        for x in 0..w {
            if x < ring || y < ring || x + ring >= w || y + ring >= h {
                let px = patch.get_pixel_mut(x, y);
                px.0[0] = QUIET_ZONE_LEVEL;
                px.0[1] = QUIET_ZONE_LEVEL;
                px.0[2] = QUIET_ZONE_LEVEL;
            }
        }
    }

    debug!(ring, "Normalized quiet zone to near-white");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EC_LEVEL, blend, layout, matrix};
    use image::{Rgba, RgbaImage};

    fn dark_background(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([30, 30, 30, 255]))
    }

    fn build(bg: &RgbaImage, quiet_zone: u32) -> (QrMatrix, Layout, Rgba32FImage) {
        let m = matrix::generate("quiet zone", EC_LEVEL, quiet_zone).unwrap();
        let l = layout::plan(bg.width(), bg.height(), m.size(), 0.5, None).unwrap();
        let patch = blend::build_patch(bg, &l, &m, 0.55);
        (m, l, patch)
    }

    #[test]
    fn test_ring_is_near_white_over_dark_photo() {
        let bg = dark_background(400);
        let (m, l, mut patch) = build(&bg, 4);
        normalize(&mut patch, &l, &m);

        // Corners and edge midpoints all sit inside the ring.
        let last = l.qr_px - 1;
        for (x, y) in [(0, 0), (last, 0), (0, last), (last, last), (l.qr_px / 2, 0)] {
            let px = patch.get_pixel(x, y);
            assert_eq!(px.0[0], QUIET_ZONE_LEVEL, "({x}, {y})");
            assert_eq!(px.0[1], QUIET_ZONE_LEVEL);
            assert_eq!(px.0[2], QUIET_ZONE_LEVEL);
        }
    }

    #[test]
    fn test_alpha_is_left_alone() {
        let bg = dark_background(400);
        let (m, l, mut patch) = build(&bg, 4);
        let before = patch.get_pixel(0, 0).0[3];
        normalize(&mut patch, &l, &m);
        assert_eq!(patch.get_pixel(0, 0).0[3], before);
    }

    #[test]
    fn test_symbol_area_is_untouched() {
        let bg = dark_background(400);
        let (m, l, mut patch) = build(&bg, 4);

        let ring = m.quiet_zone() * l.module_px;
        let inner = *patch.get_pixel(ring + 1, ring + 1);
        normalize(&mut patch, &l, &m);
        assert_eq!(*patch.get_pixel(ring + 1, ring + 1), inner);
    }

    #[test]
    fn test_zero_quiet_zone_is_a_no_op() {
        let bg = dark_background(400);
        let (m, l, mut patch) = build(&bg, 0);
        let before = patch.clone();
        normalize(&mut patch, &l, &m);
        assert_eq!(patch.as_raw(), before.as_raw());
    }

    #[test]
    fn test_ring_boundary_is_exact() {
        let bg = dark_background(400);
        let (m, l, mut patch) = build(&bg, 4);
        normalize(&mut patch, &l, &m);

        let ring = m.quiet_zone() * l.module_px;
        // Last ring pixel is near-white, first symbol pixel is not.
        assert_eq!(patch.get_pixel(ring - 1, l.qr_px / 2).0[0], QUIET_ZONE_LEVEL);
        assert!(patch.get_pixel(ring, ring).0[0] < 0.5);
    }
}

//! Pastes the finished patch back onto the photo.
//!
//! The patch arrives as floating-point RGBA; it is quantized to 8-bit and
//! composited at the planned origin. Regions of the patch that fall off the
//! photo are dropped, so oversized layouts degrade to a partial paste
//! instead of an error.

use image::{Rgba, Rgba32FImage, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::layout::Layout;

/// Quantize a floating-point patch to 8-bit RGBA.
///
/// Channels are clamped to `[0, 1]` and rounded, so a module written as
/// `0.97` comes back as the same near-white on every run.
pub fn patch_to_rgba8(patch: &Rgba32FImage) -> RgbaImage {
    let mut out = RgbaImage::new(patch.width(), patch.height());
    for (x, y, px) in patch.enumerate_pixels() {
        let q = px.0.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
        out.put_pixel(x, y, Rgba(q));
    }
    out
}

/// Composite `patch` onto `base` with its top-left corner at the signed
/// origin. Fully opaque pixels replace, fully transparent pixels are
/// skipped, anything in between is alpha-blended.
pub fn overlay(base: &mut RgbaImage, patch: &RgbaImage, origin_x: i64, origin_y: i64) {
    let (bw, bh) = (i64::from(base.width()), i64::from(base.height()));
    for (px, py, pixel) in patch.enumerate_pixels() {
        let tx = origin_x + i64::from(px);
        let ty = origin_y + i64::from(py);
        if tx < 0 || ty < 0 || tx >= bw || ty >= bh {
            continue;
        }
        let alpha = pixel[3] as f32 / 255.0;
        if alpha > 0.99 {
            base.put_pixel(tx as u32, ty as u32, *pixel);
        } else if alpha > 0.01 {
            let bg = base.get_pixel(tx as u32, ty as u32);
            let blended = blend_pixel(bg, pixel, alpha);
            base.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}

/// Draw a faint 2px rectangle around the pasted area, slightly outside it.
/// Placement aid for eyeballing layouts; off by default.
pub fn draw_debug_outline(image: &mut RgbaImage, layout: &Layout) {
    let margin = (layout.module_px as f32 * 0.8) as u32;
    let x = clamp_i32(layout.origin_x - i64::from(margin));
    let y = clamp_i32(layout.origin_y - i64::from(margin));
    let side = layout.qr_px + 2 * margin;
    let color = Rgba([255, 255, 255, 80]);
    draw_hollow_rect_mut(image, Rect::at(x, y).of_size(side, side), color);
    draw_hollow_rect_mut(image, Rect::at(x + 1, y + 1).of_size(side - 2, side - 2), color);
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

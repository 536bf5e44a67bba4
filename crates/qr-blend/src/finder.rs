//! Repaints the three finder patterns at full contrast.
//!
//! Blended modules can land close enough in brightness that a scanner never
//! locks onto the symbol. The finder patterns are what scanners search for
//! first, so those 7x7 blocks are redrawn as hard black and white instead
//! of blended.

use image::Rgba32FImage;
use tracing::debug;

use crate::layout::Layout;
use crate::matrix::QrMatrix;

/// The three corners of a QR symbol that carry a finder pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinderCorner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl FinderCorner {
    pub const ALL: [FinderCorner; 3] = [
        FinderCorner::TopLeft,
        FinderCorner::TopRight,
        FinderCorner::BottomLeft,
    ];

    /// Module coordinates of the finder's top-left corner, inside the
    /// symbol proper (past the quiet zone).
    fn module_origin(self, matrix: &QrMatrix) -> (usize, usize) {
        let near = matrix.quiet_zone() as usize;
        let far = near + matrix.symbol_size() - 7;
        match self {
            FinderCorner::TopLeft => (near, near),
            FinderCorner::TopRight => (far, near),
            FinderCorner::BottomLeft => (near, far),
        }
    }
}

/// Repaint every finder pattern in `patch` at full contrast.
pub fn force_all(patch: &mut Rgba32FImage, layout: &Layout, matrix: &QrMatrix) {
    for corner in FinderCorner::ALL {
        force(patch, layout, matrix, corner);
    }
    debug!("Forced finder patterns to full contrast");
}

/// Repaint one finder pattern: a black 7x7 fill, a white 5x5 fill one
/// module in, and a black 3x3 core two modules in. The three fills leave
/// the standard one-module rings between them.
pub fn force(patch: &mut Rgba32FImage, layout: &Layout, matrix: &QrMatrix, corner: FinderCorner) {
    let (col, row) = corner.module_origin(matrix);
    fill_modules(patch, layout, col, row, 7, 0.0);
    fill_modules(patch, layout, col + 1, row + 1, 5, 1.0);
    fill_modules(patch, layout, col + 2, row + 2, 3, 0.0);
}

/// Set RGB of a `span` x `span` module block to `level`, leaving alpha.
fn fill_modules(
    patch: &mut Rgba32FImage,
    layout: &Layout,
    col: usize,
    row: usize,
    span: usize,
    level: f32,
) {
    let x0 = col as u32 * layout.module_px;
    let y0 = row as u32 * layout.module_px;
    let x1 = (x0 + span as u32 * layout.module_px).min(patch.width());
    let y1 = (y0 + span as u32 * layout.module_px).min(patch.height());
    for y in y0..y1 {
        for x in x0..x1 {
            let px = patch.get_pixel_mut(x, y);
            px.0[0] = level;
            px.0[1] = level;
            px.0[2] = level;
        }
    }
}

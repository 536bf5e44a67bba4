//! QR module matrix generation.
//!
//! Encoding itself (version selection, masking, Reed-Solomon) is delegated to
//! the `qrcode` crate; this module wraps the symbol in a quiet-zone border and
//! exposes it as a plain boolean grid for the blending stages.

use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::Result;

/// Boolean module grid for one QR symbol, quiet zone included.
///
/// Row-major; `true` is a dark module. The quiet-zone ring is embedded as
/// light modules so downstream stages can treat the symbol and its margin as
/// one square surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    size: usize,
    quiet_zone: u32,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Total side length in modules, quiet zone included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of the QR symbol itself, without the quiet zone.
    pub fn symbol_size(&self) -> usize {
        self.size - 2 * self.quiet_zone as usize
    }

    /// Width of the embedded quiet-zone ring in modules.
    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }

    /// Whether the module at (col, row) is dark.
    ///
    /// Coordinates cover the full grid including the quiet zone, which is
    /// always light.
    pub fn is_dark(&self, col: usize, row: usize) -> bool {
        self.modules[row * self.size + col]
    }
}

/// Encode `payload` into a module matrix at the given error-correction level,
/// with `quiet_zone` light modules of border on every side.
///
/// The symbol version is the smallest standard size that fits the payload at
/// that level; encoding is deterministic for a given payload and level.
/// Fails if the payload exceeds the capacity of the largest version.
pub fn generate(payload: &str, level: EcLevel, quiet_zone: u32) -> Result<QrMatrix> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), level)?;
    let symbol = code.width();
    let colors = code.to_colors();

    let qz = quiet_zone as usize;
    let size = symbol + 2 * qz;
    let mut modules = vec![false; size * size];
    for (i, color) in colors.iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let col = i % symbol + qz;
            let row = i / symbol + qz;
            modules[row * size + col] = true;
        }
    }

    debug!(symbol, quiet_zone, size, "Encoded payload into module matrix");
    Ok(QrMatrix {
        size,
        quiet_zone,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlendError, EC_LEVEL};

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate("https://example.com", EC_LEVEL, 4).unwrap();
        let b = generate("https://example.com", EC_LEVEL, 4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_payload_uses_smallest_version() {
        // Version 1 is 21x21 modules
        let m = generate("OK", EC_LEVEL, 4).unwrap();
        assert_eq!(m.symbol_size(), 21);
        assert_eq!(m.size(), 29);
    }

    #[test]
    fn test_symbol_grows_with_payload() {
        let small = generate("OK", EC_LEVEL, 4).unwrap();
        let large = generate(&"website-payload".repeat(20), EC_LEVEL, 4).unwrap();
        assert!(large.symbol_size() > small.symbol_size());
    }

    #[test]
    fn test_quiet_zone_ring_is_light() {
        let m = generate("https://example.com", EC_LEVEL, 4).unwrap();
        let n = m.size();
        for i in 0..n {
            for ring in 0..4 {
                assert!(!m.is_dark(i, ring), "top ring must be light");
                assert!(!m.is_dark(i, n - 1 - ring), "bottom ring must be light");
                assert!(!m.is_dark(ring, i), "left ring must be light");
                assert!(!m.is_dark(n - 1 - ring, i), "right ring must be light");
            }
        }
    }

    #[test]
    fn test_symbol_corner_is_dark() {
        // The top-left module of the symbol is the corner of a finder ring.
        let m = generate("corner", EC_LEVEL, 4).unwrap();
        let qz = m.quiet_zone() as usize;
        assert!(m.is_dark(qz, qz));
    }

    #[test]
    fn test_zero_quiet_zone() {
        let m = generate("OK", EC_LEVEL, 0).unwrap();
        assert_eq!(m.size(), m.symbol_size());
        assert!(m.is_dark(0, 0));
    }

    #[test]
    fn test_oversized_payload_is_an_encoding_error() {
        // Far beyond the byte capacity of version 40 at level H.
        let payload = "x".repeat(4000);
        let err = generate(&payload, EC_LEVEL, 4).unwrap_err();
        assert!(matches!(err, BlendError::Encoding(_)));
    }
}

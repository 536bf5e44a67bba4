//! Pipeline configuration.
//!
//! One immutable struct carries every tunable so the stages stay pure;
//! nothing reads configuration from globals or the environment.

use std::path::PathBuf;

/// Configuration for one blend run.
#[derive(Debug, Clone)]
pub struct BlendOptions {
    /// QR edge length relative to `min(bg_w, bg_h)` (0..=1, typical 0.3-0.6).
    pub qr_relative_size: f32,

    /// Light border around the code, in modules.
    pub quiet_zone_modules: u32,

    /// How dark to render dark modules (0.0..=1.0, 1 = full black).
    pub dark_patch_strength: f32,

    /// Repaint the three finder patterns at full contrast.
    pub finder_force_contrast: bool,

    /// Where the composite image is written.
    pub output_path: PathBuf,

    /// Fixed module edge in pixels; `None` computes it from
    /// `qr_relative_size`.
    pub module_px_override: Option<u32>,

    /// Draw a faint bounding box around the QR square on the output.
    pub debug_outline: bool,
}

impl Default for BlendOptions {
    fn default() -> Self {
        Self {
            qr_relative_size: 0.5,
            quiet_zone_modules: 4,
            dark_patch_strength: 0.55,
            finder_force_contrast: true,
            output_path: PathBuf::from("final_with_qr.png"),
            module_px_override: None,
            debug_outline: false,
        }
    }
}

impl BlendOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the QR-to-background size ratio.
    pub fn with_qr_relative_size(mut self, val: f32) -> Self {
        self.qr_relative_size = val;
        self
    }

    /// Builder: set the quiet-zone width in modules.
    pub fn with_quiet_zone_modules(mut self, val: u32) -> Self {
        self.quiet_zone_modules = val;
        self
    }

    /// Builder: set the dark-module darkening strength.
    ///
    /// # Panics
    /// Panics if value is not in 0.0..=1.0 range.
    pub fn with_dark_patch_strength(mut self, val: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&val),
            "Dark patch strength must be between 0.0 and 1.0, got {val}"
        );
        self.dark_patch_strength = val;
        self
    }

    /// Builder: set whether finder patterns are repainted at full contrast.
    pub fn with_finder_force_contrast(mut self, val: bool) -> Self {
        self.finder_force_contrast = val;
        self
    }

    /// Builder: set the output file path.
    pub fn with_output_path(mut self, val: impl Into<PathBuf>) -> Self {
        self.output_path = val.into();
        self
    }

    /// Builder: pin the module edge to a fixed pixel size.
    pub fn with_module_px_override(mut self, val: u32) -> Self {
        self.module_px_override = Some(val);
        self
    }

    /// Builder: set the debug-outline flag.
    pub fn with_debug_outline(mut self, val: bool) -> Self {
        self.debug_outline = val;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = BlendOptions::default();
        assert!((opts.qr_relative_size - 0.5).abs() < f32::EPSILON);
        assert_eq!(opts.quiet_zone_modules, 4);
        assert!((opts.dark_patch_strength - 0.55).abs() < f32::EPSILON);
        assert!(opts.finder_force_contrast);
        assert_eq!(opts.output_path, PathBuf::from("final_with_qr.png"));
        assert_eq!(opts.module_px_override, None);
        assert!(!opts.debug_outline);
    }

    #[test]
    fn test_builder_chain() {
        let opts = BlendOptions::new()
            .with_qr_relative_size(0.3)
            .with_quiet_zone_modules(2)
            .with_dark_patch_strength(0.8)
            .with_finder_force_contrast(false)
            .with_output_path("out.png")
            .with_module_px_override(6)
            .with_debug_outline(true);

        assert!((opts.qr_relative_size - 0.3).abs() < f32::EPSILON);
        assert_eq!(opts.quiet_zone_modules, 2);
        assert!((opts.dark_patch_strength - 0.8).abs() < f32::EPSILON);
        assert!(!opts.finder_force_contrast);
        assert_eq!(opts.output_path, PathBuf::from("out.png"));
        assert_eq!(opts.module_px_override, Some(6));
        assert!(opts.debug_outline);
    }

    #[test]
    #[should_panic(expected = "Dark patch strength must be between 0.0 and 1.0")]
    fn test_invalid_dark_patch_strength() {
        BlendOptions::new().with_dark_patch_strength(1.5);
    }
}

//! Command-line front end for the blending pipeline.
//!
//! Usage: photoqr <background> <payload> [output]
//!
//! Options beyond the positional arguments come from `PHOTOQR_*` environment
//! variables, loaded from a `.env` file when one is present.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use qr_blend::BlendOptions;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    load_dotenv();

    let mut args = std::env::args().skip(1);
    let (Some(background), Some(payload)) = (args.next(), args.next()) else {
        eprintln!("Usage: photoqr <background> <payload> [output]");
        std::process::exit(2);
    };

    let mut options = BlendOptions::new();
    if let Some(output) = args.next() {
        options = options.with_output_path(output);
    }
    let options = apply_env_overrides(options);

    let written = qr_blend::run(Path::new(&background), &payload, &options)?;
    println!("Saved: {}", written.display());
    Ok(())
}

fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Apply `PHOTOQR_*` environment overrides. Unset or unparseable values
/// leave the defaults in place.
fn apply_env_overrides(mut options: BlendOptions) -> BlendOptions {
    if let Ok(v) = std::env::var("PHOTOQR_RELATIVE_SIZE") {
        if let Ok(r) = v.parse::<f32>() {
            options.qr_relative_size = r;
        }
    }
    if let Ok(v) = std::env::var("PHOTOQR_QUIET_ZONE") {
        if let Ok(q) = v.parse::<u32>() {
            options.quiet_zone_modules = q;
        }
    }
    if let Ok(v) = std::env::var("PHOTOQR_STRENGTH") {
        if let Ok(s) = v.parse::<f32>() {
            if (0.0..=1.0).contains(&s) {
                options.dark_patch_strength = s;
            }
        }
    }
    if let Ok(v) = std::env::var("PHOTOQR_MODULE_PX") {
        if let Ok(m) = v.parse::<u32>() {
            options.module_px_override = Some(m);
        }
    }
    if let Ok(v) = std::env::var("PHOTOQR_FORCE_FINDERS") {
        options.finder_force_contrast = v == "true";
    }
    if let Ok(v) = std::env::var("PHOTOQR_DEBUG_OUTLINE") {
        options.debug_outline = v == "true";
    }
    options
}

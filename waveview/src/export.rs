/*!
SVG export of rendered waveforms.

Each export session writes one `<selector>.svg` per scheme. GUI exports go
into a timestamped subdirectory of the configured export directory.
*/

use crate::config::RenderConfig;
use anyhow::{Context, Result};
use chrono::Local;
use linecode::{render_scheme, BitSequence, Rendered, Scheme, SvgSurface};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// `base/<YYYYmmdd_HHMMSS>` for the current local time
pub fn timestamped_dir<P: AsRef<Path>>(base: P) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    base.as_ref().join(timestamp)
}

/// Render `schemes` for `bits` at `width` pixels and write them into `dir`.
///
/// Returns the paths written. Schemes whose surface has no drawable area
/// (too narrow, or a non-finite size) are skipped.
pub fn export_svgs(
    dir: &Path,
    bits: &BitSequence,
    schemes: &[Scheme],
    width: f32,
    render: &RenderConfig,
) -> Result<Vec<PathBuf>> {
    if schemes.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let style = render.style();
    let mut written = Vec::with_capacity(schemes.len());

    for &scheme in schemes {
        let mut surface = SvgSurface::new(width, render.height);
        if render_scheme(Some(&mut surface), scheme, bits, &style) == Rendered::Skipped {
            warn!("Skipping {}: no drawable area at {}px", scheme, width);
            continue;
        }

        let path = dir.join(format!("{}.svg", scheme.selector()));
        surface
            .save(&path)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        written.push(path);
    }

    info!("📁 Exported {} waveform(s) to {}", written.len(), dir.display());
    Ok(written)
}

//! Utility functions

use crate::constants::{APP_NAME, CJK_FONT_CANDIDATES};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// Indigo rounded square with a white heart, used for the window/taskbar icon
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect width="64" height="64" rx="14" fill="#4f46e5"/><path fill="#fff" d="M32 50 L14.5 33.2 C9.6 28.4 9.9 20.6 15.3 16.6 C20 13.2 26.4 14.3 30 18.8 L32 21.3 L34 18.8 C37.6 14.3 44 13.2 48.7 16.6 C54.1 20.6 54.4 28.4 49.5 33.2 Z"/></svg>"##;

/// Rasterize the icon SVG to a square RGBA image.
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = match resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "Failed to parse icon SVG");
            return None;
        }
    };
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Per-user application data directory
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    get_data_dir().join("cache")
}

/// File name under which a remote image is cached
pub fn image_cache_name(url: &str) -> String {
    let stem = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    name.push_str(".img");
    name
}

/// Load the first available CJK-capable font. `preferred` is tried before the built-in list.
pub fn load_cjk_font(preferred: Option<&str>) -> Option<(PathBuf, Vec<u8>)> {
    let candidates = preferred
        .into_iter()
        .chain(CJK_FONT_CANDIDATES.iter().copied())
        .map(Path::new);

    for path in candidates {
        match std::fs::read(path) {
            Ok(bytes) => {
                debug!(path = %path.display(), "Loaded CJK font");
                return Some((path.to_path_buf(), bytes));
            }
            Err(_) => continue,
        }
    }
    warn!("No CJK font found, Chinese text may not render");
    None
}

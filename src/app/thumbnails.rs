//! Remote image prefetch and texture loading

use super::App;
use crate::constants::IMAGE_PREFETCH_CONCURRENCY;
use crate::data;
use crate::utils::image_cache_name;
use eframe::egui;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

impl App {
    /// Download every avatar and thumbnail that is not cached on disk yet
    pub fn start_image_prefetch(&mut self, ctx: &egui::Context) {
        let image_dir = self.cache_dir.join("images");
        let ctx_clone = ctx.clone();
        let urls = data::remote_images();

        debug!(count = urls.len(), "Starting image prefetch");

        self.runtime.spawn(async move {
            if let Err(e) = std::fs::create_dir_all(&image_dir) {
                warn!(error = %e, "Failed to create image cache directory");
                return;
            }

            let client = reqwest::Client::new();
            let semaphore = Arc::new(tokio::sync::Semaphore::new(IMAGE_PREFETCH_CONCURRENCY));

            let downloads = urls.into_iter().filter_map(|url| {
                let path = image_dir.join(image_cache_name(url));
                if path.exists() {
                    return None;
                }
                let sem = semaphore.clone();
                let client = client.clone();
                let ctx = ctx_clone.clone();
                Some(async move {
                    let _permit = sem.acquire().await.ok();
                    let response = match client.get(url).send().await {
                        Ok(r) if r.status().is_success() => r,
                        Ok(r) => {
                            debug!(url, status = %r.status(), "Image request rejected");
                            return;
                        }
                        Err(e) => {
                            debug!(url, error = %e, "Image request failed");
                            return;
                        }
                    };
                    match response.bytes().await {
                        Ok(bytes) => {
                            if let Err(e) = write_cache_file(&path, &bytes) {
                                warn!(path = %path.display(), error = %e, "Failed to cache image");
                            }
                            ctx.request_repaint();
                        }
                        Err(e) => debug!(url, error = %e, "Image body failed"),
                    }
                })
            });

            futures::future::join_all(downloads).await;
            debug!("Image prefetch finished");
        });
    }

    /// Texture for a remote image, once its download has landed in the cache
    pub fn load_image(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.image_cache.get(url) {
            return cached.clone();
        }

        let path = self.cache_dir.join("images").join(image_cache_name(url));
        if !path.exists() {
            return None;
        }

        // Cached files carry no format extension, so sniff the header
        let decoded = image::ImageReader::open(&path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(image::ImageError::IoError)
            .and_then(|reader| reader.decode());
        let texture = match decoded {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                Some(ctx.load_texture(
                    url,
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(e) => {
                warn!(url, error = %e, "Failed to decode cached image");
                None
            }
        };
        self.image_cache.insert(url.to_string(), texture.clone());
        texture
    }
}

/// Write through a sibling temp file so readers never see a partial image
fn write_cache_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let partial = path.with_extension("part");
    std::fs::write(&partial, bytes)?;
    std::fs::rename(&partial, path).inspect_err(|_| {
        std::fs::remove_file(&partial).ok();
    })
}

//! Remote and inline image loading. Bytes are fetched and decoded on worker
//! threads; textures are created lazily on the UI thread.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use eframe::egui::{self, ColorImage, TextureHandle};
use reqwest::blocking::Client;
use thiserror::Error;
use wellnest_core::upload::decode_data_uri;

static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("malformed data URI")]
    DataUri,
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn http_client() -> Result<Client, ImageLoadError> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }
    let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
    let _ = HTTP_CLIENT.set(client.clone());
    Ok(client)
}

pub fn decode(bytes: &[u8]) -> Result<LoadedImage, ImageLoadError> {
    let dyn_img = image::load_from_memory(bytes)?;
    let rgba = dyn_img.to_rgba8();
    Ok(LoadedImage {
        size: [rgba.width() as usize, rgba.height() as usize],
        pixels: rgba.into_raw(),
    })
}

/// Loads an image reference: inline `data:` URIs are decoded directly,
/// anything else is downloaded.
pub fn fetch(src: &str) -> Result<LoadedImage, ImageLoadError> {
    if src.starts_with("data:") {
        let (_, bytes) = decode_data_uri(src).ok_or(ImageLoadError::DataUri)?;
        return decode(&bytes);
    }
    decode(&download(src)?)
}

/// Like [`fetch`], but remote bytes are kept in `cache_dir` and read back
/// from there on later runs.
pub fn fetch_cached(src: &str, cache_dir: &Path) -> Result<LoadedImage, ImageLoadError> {
    if src.starts_with("data:") {
        return fetch(src);
    }
    let cache_path = cache_path(cache_dir, src);
    if let Ok(bytes) = fs::read(&cache_path) {
        return decode(&bytes);
    }
    log::info!("downloading image {src}");
    let bytes = download(src)?;
    let image = decode(&bytes)?;
    if let Err(err) = fs::create_dir_all(cache_dir).and_then(|()| fs::write(&cache_path, &bytes)) {
        log::warn!("failed to write cache file {}: {err}", cache_path.display());
    }
    Ok(image)
}

pub fn cache_path(cache_dir: &Path, src: &str) -> PathBuf {
    let mut hasher = DefaultHasher::new();
    src.hash(&mut hasher);
    cache_dir.join(format!("{:016x}", hasher.finish()))
}

fn download(src: &str) -> Result<Vec<u8>, ImageLoadError> {
    let client = http_client()?;
    let bytes = client.get(src).send()?.error_for_status()?.bytes()?;
    Ok(bytes.to_vec())
}

pub enum ImageSlot {
    Ready(TextureHandle),
    Loading,
    Failed,
}

#[derive(Default)]
pub struct ImageCache {
    textures: HashMap<String, TextureHandle>,
    pending: HashMap<String, LoadedImage>,
    loading: HashSet<String>,
    failed: HashSet<String>,
}

impl ImageCache {
    pub fn failed(&self) -> &HashSet<String> {
        &self.failed
    }

    /// Marks `src` as in flight. Returns false if it is already known.
    pub fn begin(&mut self, src: &str) -> bool {
        if self.textures.contains_key(src)
            || self.pending.contains_key(src)
            || self.failed.contains(src)
        {
            return false;
        }
        self.loading.insert(src.to_string())
    }

    pub fn finish(&mut self, src: String, result: Result<LoadedImage, String>) {
        self.loading.remove(&src);
        match result {
            Ok(image) => {
                self.pending.insert(src, image);
            }
            Err(err) => {
                log::warn!("image {src} failed to load: {err}");
                self.failed.insert(src);
            }
        }
    }

    pub fn slot(&mut self, ctx: &egui::Context, src: &str) -> ImageSlot {
        if let Some(texture) = self.textures.get(src) {
            return ImageSlot::Ready(texture.clone());
        }
        if let Some(image) = self.pending.remove(src) {
            let color = ColorImage::from_rgba_unmultiplied(image.size, &image.pixels);
            let texture = ctx.load_texture(src, color, egui::TextureOptions::LINEAR);
            self.textures.insert(src.to_string(), texture.clone());
            return ImageSlot::Ready(texture);
        }
        if self.failed.contains(src) {
            ImageSlot::Failed
        } else {
            ImageSlot::Loading
        }
    }

    /// Drops a cached texture so the next lookup reloads it.
    pub fn forget(&mut self, src: &str) {
        self.textures.remove(src);
        self.pending.remove(src);
        self.failed.remove(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn png() -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 3, Rgba([9, 8, 7, 255])))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode");
        bytes
    }

    #[test]
    fn decodes_to_rgba_pixels() {
        let image = decode(&png()).expect("decode");
        assert_eq!(image.size, [2, 3]);
        assert_eq!(image.pixels.len(), 2 * 3 * 4);
        assert_eq!(&image.pixels[..4], &[9, 8, 7, 255]);
    }

    #[test]
    fn inline_data_uri_needs_no_network() {
        let captured = wellnest_core::upload::CapturedImage::from_gallery_bytes(png()).expect("png");
        let image = fetch(&captured.to_image_ref()).expect("inline");
        assert_eq!(image.size, [2, 3]);
        assert!(matches!(fetch("data:image/png;base64,@@@"), Err(ImageLoadError::DataUri)));
    }

    #[test]
    fn cached_bytes_skip_the_download() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = "https://images.invalid/hospital.png";
        fs::write(cache_path(dir.path(), src), png()).expect("seed cache");
        let image = fetch_cached(src, dir.path()).expect("cached");
        assert_eq!(image.size, [2, 3]);
    }

    #[test]
    fn failures_are_remembered_and_not_refetched() {
        let mut cache = ImageCache::default();
        assert!(cache.begin("https://example.com/x.png"));
        assert!(!cache.begin("https://example.com/x.png"));
        cache.finish("https://example.com/x.png".into(), Err("404".into()));
        assert!(cache.failed().contains("https://example.com/x.png"));
        assert!(!cache.begin("https://example.com/x.png"));

        cache.forget("https://example.com/x.png");
        assert!(cache.begin("https://example.com/x.png"));
    }
}

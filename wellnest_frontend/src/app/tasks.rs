use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use eframe::egui::Context;
use log::error;
use poll_promise::Promise;
use wellnest_core::animation::BurstTicket;
use wellnest_core::upload::read_gallery_file;

use super::messages::AppMessage;
use crate::image_loader::{self, LoadedImage};

fn send(tx: &Sender<AppMessage>, ctx: &Context, message: AppMessage, name: &str) {
    if tx.send(message).is_err() {
        error!("failed to send {name} message");
    }
    ctx.request_repaint();
}

pub fn download_image(tx: Sender<AppMessage>, ctx: Context, src: String, cache_dir: PathBuf) {
    thread::spawn(move || {
        let result = image_loader::fetch_cached(&src, &cache_dir).map_err(|err| err.to_string());
        send(&tx, &ctx, AppMessage::ImageLoaded { src, result }, "ImageLoaded");
    });
}

pub fn pick_gallery_image(tx: Sender<AppMessage>, ctx: Context) {
    thread::spawn(move || {
        let picked = rfd::FileDialog::new()
            .set_title("사진 선택")
            .add_filter("이미지", &["png", "jpg", "jpeg", "gif"])
            .pick_file();
        let message = match picked {
            Some(path) => AppMessage::GalleryLoaded(
                read_gallery_file(&path).map_err(|err| err.to_string()),
            ),
            None => AppMessage::GalleryCancelled,
        };
        send(&tx, &ctx, message, "GalleryLoaded");
    });
}

/// Delivers `ticket` once the burst should end. A newer burst makes the
/// ticket stale, so late deliveries are ignored.
pub fn schedule_burst_reset(tx: Sender<AppMessage>, ctx: Context, ticket: BurstTicket, after: Duration) {
    thread::spawn(move || {
        thread::sleep(after);
        send(&tx, &ctx, AppMessage::ReactionBurstExpired(ticket), "ReactionBurstExpired");
    });
}

pub fn load_map_tile(url: String) -> Promise<Result<LoadedImage, String>> {
    Promise::spawn_thread("map_tile", move || {
        image_loader::fetch(&url).map_err(|err| err.to_string())
    })
}

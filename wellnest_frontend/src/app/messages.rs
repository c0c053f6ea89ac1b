use eframe::egui::Context;
use log::{info, warn};
use wellnest_core::animation::BurstTicket;

use super::WellnestApp;
use crate::image_loader::LoadedImage;

pub enum AppMessage {
    ImageLoaded {
        src: String,
        result: Result<LoadedImage, String>,
    },
    GalleryLoaded(Result<Vec<u8>, String>),
    GalleryCancelled,
    ReactionBurstExpired(BurstTicket),
}

pub(super) fn process_messages(app: &mut WellnestApp, ctx: &Context) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::ImageLoaded { src, result } => {
                app.images.finish(src, result);
            }
            AppMessage::GalleryLoaded(result) => {
                app.pages.upload.picking_gallery = false;
                let Some(flow) = app.upload.as_mut() else {
                    info!("gallery selection arrived after the upload page closed");
                    continue;
                };
                let outcome = result
                    .and_then(|bytes| flow.select_gallery(bytes).map_err(|err| err.to_string()));
                match outcome {
                    Ok(()) => app.refresh_upload_preview(ctx),
                    Err(err) => {
                        warn!("gallery selection failed: {err}");
                        app.info_banner = Some(format!("사진을 불러오지 못했습니다: {err}"));
                    }
                }
            }
            AppMessage::GalleryCancelled => {
                app.pages.upload.picking_gallery = false;
            }
            AppMessage::ReactionBurstExpired(ticket) => {
                app.feed.expire_burst(ticket);
            }
        }
    }
}

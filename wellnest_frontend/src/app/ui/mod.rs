use eframe::egui::{self, RichText, Vec2};
use wellnest_core::models::{resolve_image, FALLBACK_IMAGE};
use wellnest_core::Page;

use super::{tasks, WellnestApp};
use crate::image_loader::ImageSlot;
use crate::theme;

mod community;
mod home;
mod hospital;
mod login;
mod profile;
mod upload;

impl WellnestApp {
    /// Draws a remote or inline image, starting its download on first use.
    /// Anything that failed to load is drawn as the fallback tile.
    pub(crate) fn show_image(&mut self, ui: &mut egui::Ui, src: &str, size: Vec2) -> egui::Response {
        let src = resolve_image(src, self.images.failed()).to_string();
        if src != FALLBACK_IMAGE {
            match self.images.slot(ui.ctx(), &src) {
                ImageSlot::Ready(texture) => {
                    return ui.add(
                        egui::Image::from_texture(&texture)
                            .fit_to_exact_size(size)
                            .rounding(8.0),
                    );
                }
                ImageSlot::Loading => {
                    if self.images.begin(&src) {
                        tasks::download_image(
                            self.tx.clone(),
                            ui.ctx().clone(),
                            src,
                            self.config.paths.image_cache_dir.clone(),
                        );
                    }
                }
                ImageSlot::Failed => {}
            }
        }
        placeholder(ui, size)
    }

    pub(crate) fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        let current = self.session.current_page();
        ui.columns(Page::TABS.len(), |columns| {
            for (column, page) in columns.iter_mut().zip(Page::TABS) {
                column.vertical_centered(|ui| {
                    let text = RichText::new(page.label());
                    let text = if current == page {
                        text.color(theme::BRAND).strong()
                    } else {
                        text.color(theme::MUTED)
                    };
                    if ui.selectable_label(current == page, text).clicked() {
                        self.navigate(page);
                    }
                });
            }
        });
    }

    pub(crate) fn render_reaction_burst(&self, ctx: &egui::Context) {
        let Some(emoji) = self.feed.burst().active() else {
            return;
        };
        egui::Area::new(egui::Id::new("reaction_burst"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(RichText::new(emoji).size(72.0));
            });
    }
}

pub(crate) fn placeholder(ui: &mut egui::Ui, size: Vec2) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    ui.painter().rect_filled(rect, 8.0, theme::SURFACE);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "🖼",
        egui::FontId::proportional(20.0),
        theme::MUTED,
    );
    response
}

/// Title row with a back arrow; true when the arrow was pressed.
pub(crate) fn header(ui: &mut egui::Ui, title: &str) -> bool {
    let mut back = false;
    ui.horizontal(|ui| {
        if ui.button("←").clicked() {
            back = true;
        }
        ui.label(RichText::new(title).size(18.0).strong());
    });
    ui.separator();
    back
}

pub(crate) fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).size(16.0).strong());
    ui.add_space(4.0);
}

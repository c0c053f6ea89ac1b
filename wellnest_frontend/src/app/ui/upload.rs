use eframe::egui::{self, RichText};
use log::{info, warn};
use wellnest_core::community::PostDraft;
use wellnest_core::upload::{
    AnnotationKind, CaptureMode, CaptureOutcome, ImageSource, PermissionOutcome, PostAnnotations,
};
use wellnest_core::Page;

use super::header;
use crate::app::WellnestApp;
use crate::theme;

enum UploadAction {
    Allow,
    Deny,
    Shutter,
    Gallery,
    SwitchCamera,
    Edit,
    CloseDetail,
    SelectAnnotation(AnnotationKind),
    ApplyAnnotation,
}

fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text.to_string()).color(egui::Color32::WHITE))
        .fill(theme::BRAND)
        .min_size(egui::vec2(120.0, 40.0))
}

impl WellnestApp {
    pub(crate) fn render_upload(&mut self, ui: &mut egui::Ui) {
        if header(ui, Page::Upload.label()) {
            self.go_back();
            return;
        }
        let Some(flow) = self.upload.as_ref() else {
            ui.spinner();
            return;
        };
        let mode = flow.mode();
        let live = flow.has_live_stream();
        let can_switch = flow.can_switch_camera();
        let camera_message = flow.camera_error().map(ToString::to_string);
        let remote_image = flow.image().and_then(|image| match image.source() {
            ImageSource::Remote(url) => Some(url.clone()),
            ImageSource::Encoded { .. } => None,
        });
        let annotations = flow.annotations().clone();

        let mut action = None;
        match mode {
            CaptureMode::Permission(prompt) => {
                ui.add_space(80.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(prompt.title()).size(20.0).strong());
                    ui.add_space(8.0);
                    ui.label(RichText::new(prompt.body()).color(theme::MUTED));
                    ui.add_space(24.0);
                    if ui.add(primary_button("허용")).clicked() {
                        action = Some(UploadAction::Allow);
                    }
                    if ui.button("허용 안 함").clicked() {
                        action = Some(UploadAction::Deny);
                    }
                });
            }
            CaptureMode::Idle => {
                let size = egui::vec2(ui.available_width(), ui.available_width());
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                ui.painter().rect_filled(rect, 12.0, theme::TEXT);
                let text = if live {
                    "카메라 준비 완료".to_string()
                } else {
                    camera_message.unwrap_or_else(|| "카메라를 준비하고 있습니다.".to_string())
                };
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(14.0),
                    egui::Color32::WHITE,
                );
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("🖼 갤러리").clicked() {
                        action = Some(UploadAction::Gallery);
                    }
                    if ui.add(primary_button("📸 촬영")).clicked() {
                        action = Some(UploadAction::Shutter);
                    }
                    if ui.add_enabled(can_switch, egui::Button::new("🔄 전환")).clicked() {
                        action = Some(UploadAction::SwitchCamera);
                    }
                });
            }
            CaptureMode::Captured | CaptureMode::DetailAdjust => {
                self.render_upload_preview(ui, remote_image.as_deref(), &annotations);
                ui.add_space(8.0);
                if mode == CaptureMode::Captured {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.pages.upload.caption)
                            .hint_text("가족에게 한마디 남겨보세요")
                            .desired_rows(2)
                            .desired_width(f32::INFINITY),
                    );
                    ui.horizontal(|ui| {
                        if ui.button("✏ 꾸미기").clicked() {
                            action = Some(UploadAction::Edit);
                        }
                        if ui.button("🖼 다시 선택").clicked() {
                            action = Some(UploadAction::Gallery);
                        }
                        if ui.add(primary_button("올리기")).clicked() {
                            action = Some(UploadAction::Shutter);
                        }
                    });
                } else {
                    ui.horizontal_wrapped(|ui| {
                        for kind in AnnotationKind::ALL {
                            let selected = self.pages.upload.annotation_kind == kind;
                            if ui.selectable_label(selected, kind.label()).clicked() {
                                action = Some(UploadAction::SelectAnnotation(kind));
                            }
                        }
                    });
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.pages.upload.annotation_text)
                                .hint_text(self.pages.upload.annotation_kind.label()),
                        );
                        if ui.button("적용").clicked() {
                            action = Some(UploadAction::ApplyAnnotation);
                        }
                    });
                    if ui.add(primary_button("완료")).clicked() {
                        action = Some(UploadAction::CloseDetail);
                    }
                }
            }
        }

        if let Some(action) = action {
            self.apply_upload_action(ui.ctx(), action);
        }
    }

    fn render_upload_preview(
        &mut self,
        ui: &mut egui::Ui,
        remote_image: Option<&str>,
        annotations: &PostAnnotations,
    ) {
        let width = ui.available_width();
        let size = egui::vec2(width, width * 0.75);
        let response = if let Some(texture) = self.pages.upload.preview.clone() {
            ui.add(
                egui::Image::from_texture(&texture)
                    .fit_to_exact_size(size)
                    .rounding(8.0),
            )
        } else if let Some(url) = remote_image {
            self.show_image(ui, url, size)
        } else {
            super::placeholder(ui, size)
        };
        if let Some(text) = &annotations.text {
            ui.painter().text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                text,
                egui::FontId::proportional(24.0),
                egui::Color32::WHITE,
            );
        }
        ui.horizontal_wrapped(|ui| {
            for kind in AnnotationKind::ALL.into_iter().skip(1) {
                if let Some(value) = annotations.get(kind) {
                    ui.label(
                        RichText::new(format!("{} {value}", kind.label()))
                            .small()
                            .color(theme::MUTED),
                    );
                }
            }
        });
    }

    fn apply_upload_action(&mut self, ctx: &egui::Context, action: UploadAction) {
        let Some(flow) = self.upload.as_mut() else {
            return;
        };
        match action {
            UploadAction::Allow => {
                flow.allow_permission(&mut self.prefs);
            }
            UploadAction::Deny => {
                if flow.deny_permission() == PermissionOutcome::Leave {
                    self.go_back();
                }
            }
            UploadAction::Shutter => match flow.capture() {
                Ok(CaptureOutcome::Captured) => self.refresh_upload_preview(ctx),
                Ok(CaptureOutcome::Upload(draft)) => self.publish(draft),
                Err(err) => {
                    warn!("capture failed: {err}");
                    self.info_banner = Some(err.to_string());
                }
            },
            UploadAction::Gallery => self.pick_gallery_image(ctx),
            UploadAction::SwitchCamera => {
                flow.switch_camera();
            }
            UploadAction::Edit => {
                if let Err(err) = flow.edit() {
                    warn!("{err}");
                }
            }
            UploadAction::CloseDetail => {
                if let Err(err) = flow.close_detail() {
                    warn!("{err}");
                }
            }
            UploadAction::SelectAnnotation(kind) => {
                self.pages.upload.annotation_kind = kind;
                self.pages.upload.annotation_text =
                    flow.annotations().get(kind).unwrap_or_default().to_string();
            }
            UploadAction::ApplyAnnotation => {
                let kind = self.pages.upload.annotation_kind;
                if let Err(err) = flow.set_annotation(kind, &self.pages.upload.annotation_text) {
                    warn!("{err}");
                }
            }
        }
    }

    fn publish(&mut self, mut draft: PostDraft) {
        if draft.caption.is_empty() {
            draft.caption = self.pages.upload.caption.trim().to_string();
        }
        let id = self.feed.publish(draft);
        info!("shared post {id} with {}", self.feed.selected_group());
        self.feed.show_feed();
        self.navigate(Page::Community);
    }
}

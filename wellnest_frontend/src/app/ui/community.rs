use eframe::egui::{self, RichText};
use wellnest_core::community::{BackOutcome, FeedViewMode, EMOJI_PALETTE};
use wellnest_core::models::Post;
use wellnest_core::Page;

use super::header;
use crate::app::WellnestApp;
use crate::theme;

impl WellnestApp {
    pub(crate) fn render_community(&mut self, ui: &mut egui::Ui) {
        let mode = self.feed.view_mode();
        let title = match mode {
            FeedViewMode::Feed => "커뮤니티",
            FeedViewMode::Grid => "모아보기",
            FeedViewMode::MyReactions => "내가 반응한 글",
        };
        if header(ui, title) {
            if self.feed.back() == BackOutcome::LeavePage {
                self.go_back();
            }
            return;
        }

        let mut open_upload = false;
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("👪 {}", self.feed.selected_group())).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| match mode {
                FeedViewMode::Feed => {
                    if ui.button("📷 올리기").clicked() {
                        open_upload = true;
                    }
                    if ui.button("▦ 모아보기").clicked() {
                        self.feed.open_grid();
                    }
                }
                FeedViewMode::Grid => {
                    if ui.button("💬 내 반응 모아보기").clicked() {
                        self.feed.open_my_reactions();
                    }
                }
                FeedViewMode::MyReactions => {}
            });
        });
        if open_upload {
            self.navigate(Page::Upload);
            return;
        }
        ui.add_space(6.0);

        let posts: Vec<Post> = self.feed.visible_posts().into_iter().cloned().collect();
        egui::ScrollArea::vertical().show(ui, |ui| {
            if posts.is_empty() {
                ui.add_space(40.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("아직 반응한 게시물이 없어요.").color(theme::MUTED));
                });
            }
            match mode {
                FeedViewMode::Grid => self.render_post_grid(ui, &posts),
                FeedViewMode::Feed | FeedViewMode::MyReactions => {
                    for post in &posts {
                        self.render_post(ui, post);
                    }
                }
            }
        });

        self.render_reaction_sheet(ui.ctx());
    }

    fn render_post_grid(&mut self, ui: &mut egui::Ui, posts: &[Post]) {
        let side = (ui.available_width() - 8.0) / 3.0;
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
            for post in posts {
                let response = self.show_image(ui, &post.image, egui::vec2(side, side));
                if response.interact(egui::Sense::click()).clicked() {
                    self.feed.select_post_for_reactions(post.id);
                }
            }
        });
    }

    fn render_post(&mut self, ui: &mut egui::Ui, post: &Post) {
        let ctx = ui.ctx().clone();
        egui::Frame::none()
            .inner_margin(egui::Margin::symmetric(0.0, 8.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_image(ui, &post.author.avatar, egui::vec2(32.0, 32.0));
                    ui.label(RichText::new(&post.author.name).strong());
                    if let Some(badge) = &post.badge {
                        ui.label(
                            RichText::new(badge)
                                .small()
                                .color(theme::shade(theme::BRAND, 0.7))
                                .background_color(theme::wash(theme::BRAND, 0.25)),
                        );
                    }
                });

                let width = ui.available_width();
                let image = self.show_image(ui, &post.image, egui::vec2(width, width * 0.75));
                if let Some(overlay) = &post.text_overlay {
                    ui.painter().text(
                        image.rect.center(),
                        egui::Align2::CENTER_CENTER,
                        overlay,
                        egui::FontId::proportional(24.0),
                        egui::Color32::WHITE,
                    );
                }

                ui.horizontal_wrapped(|ui| {
                    for (icon, value) in [
                        ("📍", &post.location),
                        ("☀", &post.weather),
                        ("🕒", &post.time),
                        ("💚", &post.health),
                    ] {
                        if let Some(value) = value {
                            ui.label(RichText::new(format!("{icon} {value}")).small().color(theme::MUTED));
                        }
                    }
                });
                ui.label(&post.caption);

                let reactions = self.feed.merged_reactions(post);
                ui.horizontal_wrapped(|ui| {
                    for reaction in &reactions {
                        let mine = reaction.has_user(&self.feed.current_user().name);
                        let label = format!("{} {}", reaction.emoji, reaction.users.len());
                        if ui.selectable_label(mine, label).clicked() {
                            self.react(&ctx, &reaction.emoji, post.id);
                        }
                    }
                    let picker_open = self.feed.emoji_picker_target() == Some(post.id);
                    if ui.selectable_label(picker_open, "☺+").clicked() {
                        self.feed.toggle_emoji_picker(post.id);
                    }
                    let total = self.feed.reaction_count(post);
                    if total > 0 && ui.link(format!("반응 {total}개")).clicked() {
                        self.feed.select_post_for_reactions(post.id);
                    }
                });
                if self.feed.emoji_picker_target() == Some(post.id) {
                    ui.horizontal(|ui| {
                        for emoji in EMOJI_PALETTE {
                            if ui.button(RichText::new(emoji).size(20.0)).clicked() {
                                self.react(&ctx, emoji, post.id);
                            }
                        }
                    });
                }

                for comment in self.feed.merged_comments(post) {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(&comment.author.name).strong());
                        ui.label(&comment.text);
                        ui.label(RichText::new(&comment.timestamp).small().color(theme::MUTED));
                    });
                }
                ui.horizontal(|ui| {
                    let input_width = ui.available_width() - 48.0;
                    let input = ui.add(
                        egui::TextEdit::singleline(self.feed.comment_draft_mut())
                            .id(egui::Id::new(("comment_input", post.id.0)))
                            .hint_text("댓글 달기...")
                            .desired_width(input_width),
                    );
                    let submitted =
                        input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("게시").clicked() || submitted {
                        self.feed.add_comment(post.id);
                    }
                });
            });
        ui.separator();
    }

    fn render_reaction_sheet(&mut self, ctx: &egui::Context) {
        let Some(post_id) = self.feed.selected_post() else {
            return;
        };
        let reactions = self
            .feed
            .post(post_id)
            .map(|post| self.feed.merged_reactions(post))
            .unwrap_or_default();
        let mut open = true;
        egui::Window::new("반응")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
            .show(ctx, |ui| {
                if reactions.is_empty() {
                    ui.label(RichText::new("아직 반응이 없어요.").color(theme::MUTED));
                }
                for reaction in &reactions {
                    let names: Vec<&str> =
                        reaction.users.iter().map(|user| user.name.as_str()).collect();
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&reaction.emoji).size(20.0));
                        ui.label(names.join(", "));
                    });
                }
            });
        if !open {
            self.feed.clear_selected_post();
        }
    }
}

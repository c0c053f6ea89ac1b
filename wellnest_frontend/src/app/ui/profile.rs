use eframe::egui::{self, RichText};
use wellnest_core::models::VisitKind;
use wellnest_core::pages::{HistoryFilter, HistoryTab, MedicalHistory, PROFILE_MENU};
use wellnest_core::Page;

use super::{header, section_title};
use crate::app::WellnestApp;
use crate::theme;

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::none()
        .fill(theme::SURFACE)
        .rounding(10.0)
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

impl WellnestApp {
    pub(crate) fn render_profile(&mut self, ui: &mut egui::Ui, user_name: &str) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("👤").size(48.0));
            ui.label(RichText::new(format!("{user_name}님")).size(20.0).strong());
        });
        ui.add_space(16.0);
        ui.separator();

        let mut target = None;
        for item in PROFILE_MENU {
            let row = ui.add_sized(
                [ui.available_width(), 44.0],
                egui::Button::new(RichText::new(item.label).size(15.0)).frame(false),
            );
            if row.clicked() {
                target = item.target;
            }
            ui.separator();
        }
        if let Some(page) = target {
            self.navigate(page);
        }

        ui.add_space(24.0);
        if ui.button(RichText::new("로그아웃").color(theme::ALERT)).clicked() {
            self.logout();
        }
    }

    pub(crate) fn render_medical_history(&mut self, ui: &mut egui::Ui) {
        if header(ui, Page::MedicalHistory.label()) {
            self.go_back();
            return;
        }
        ui.horizontal(|ui| {
            for tab in [HistoryTab::Treatment, HistoryTab::Medical] {
                let history = &mut self.pages.history;
                if ui.selectable_label(history.tab == tab, tab.label()).clicked() {
                    history.tab = tab;
                }
            }
        });
        ui.add_space(8.0);

        let history = &mut self.pages.history;
        let records = &self.seed.records;
        ui.horizontal_wrapped(|ui| {
            let period = history.filter == HistoryFilter::Period;
            if ui.selectable_label(period, "📅 기간검색").clicked() {
                history.toggle_filter(HistoryFilter::Period);
            }
            for name in MedicalHistory::patients(records) {
                let chip = HistoryFilter::Patient(name.to_string());
                if ui.selectable_label(history.filter == chip, name).clicked() {
                    history.toggle_filter(chip);
                }
            }
        });
        ui.add_space(8.0);

        let history = &self.pages.history;
        egui::ScrollArea::vertical().show(ui, |ui| match history.tab {
            HistoryTab::Treatment => {
                for record in history.records(records) {
                    card(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&record.patient.name).strong());
                            ui.label(RichText::new(&record.code).small().color(theme::MUTED));
                        });
                        ui.label(RichText::new(&record.hospital_name).size(16.0).strong());
                        ui.label(
                            RichText::new(format!(
                                "{} {} · {}",
                                record.visit_date, record.visit_time, record.doctor
                            ))
                            .color(theme::MUTED),
                        );
                        if !record.memo.is_empty() {
                            ui.label(record.memo.as_str());
                        }
                    });
                    ui.add_space(8.0);
                }
            }
            HistoryTab::Medical => {
                section_title(ui, "최근 방문");
                for visit in history.visits(&self.seed.visits) {
                    card(ui, |ui| {
                        ui.horizontal(|ui| {
                            let icon = match visit.kind {
                                VisitKind::Hospital => "🏥",
                                VisitKind::Pharmacy => "💊",
                            };
                            ui.label(icon);
                            ui.label(RichText::new(&visit.name).strong());
                        });
                        ui.label(
                            RichText::new(format!("{} ({})", visit.visit_date, visit.day_of_week))
                                .color(theme::MUTED),
                        );
                    });
                    ui.add_space(8.0);
                }
            }
        });
    }

    pub(crate) fn render_my_reviews(&mut self, ui: &mut egui::Ui) {
        if header(ui, Page::MyReviews.label()) {
            self.go_back();
            return;
        }
        ui.label(
            RichText::new(format!("작성한 후기 {}개", self.seed.reviews.len())).color(theme::MUTED),
        );
        ui.add_space(8.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            for review in &self.seed.reviews {
                card(ui, |ui| {
                    ui.label(RichText::new(&review.hospital_name).size(16.0).strong());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(stars(review.rating)).color(theme::BRAND));
                        ui.label(
                            RichText::new(format!(
                                "{} · {}",
                                review.visit_type.label(),
                                review.day_of_week
                            ))
                            .small()
                            .color(theme::MUTED),
                        );
                    });
                    ui.horizontal_wrapped(|ui| {
                        for tag in &review.tags {
                            ui.label(
                                RichText::new(format!("#{tag}"))
                                    .small()
                                    .background_color(theme::wash(theme::BRAND, 0.2)),
                            );
                        }
                    });
                    ui.label(review.content.as_str());
                    ui.label(RichText::new(&review.date).small().color(theme::MUTED));
                });
                ui.add_space(8.0);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::stars;
    use pretty_assertions::assert_eq;

    #[test]
    fn stars_clamp_to_five() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(0), "☆☆☆☆☆");
    }
}

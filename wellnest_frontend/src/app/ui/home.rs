use chrono::{Datelike, Local};
use eframe::egui::{self, RichText};
use wellnest_core::models::VisitKind;
use wellnest_core::pages::HospitalSearch;
use wellnest_core::Page;

use super::section_title;
use crate::app::WellnestApp;
use crate::theme;

const WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

impl WellnestApp {
    pub(crate) fn render_home(&mut self, ui: &mut egui::Ui, user_name: &str) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            let today = Local::now().date_naive();
            ui.label(
                RichText::new(format!(
                    "{}월 {}일 ({})",
                    today.month(),
                    today.day(),
                    WEEKDAYS[today.weekday().num_days_from_monday() as usize]
                ))
                .color(theme::MUTED),
            );
            ui.label(RichText::new(format!("{user_name}님, 오늘도 건강하세요!")).size(22.0).strong());
            ui.add_space(16.0);

            ui.columns(2, |columns| {
                let shortcuts = [
                    ("🏥 병원 찾기", theme::wash(theme::BRAND, 0.3), Page::Hospital),
                    ("👨‍👩‍👧 가족 커뮤니티", theme::SURFACE, Page::Community),
                ];
                for (column, (label, fill, page)) in columns.iter_mut().zip(shortcuts) {
                    let width = column.available_width();
                    let button = egui::Button::new(RichText::new(label).size(16.0))
                        .fill(fill)
                        .min_size(egui::vec2(width, 72.0));
                    if column.add(button).clicked() {
                        self.navigate(page);
                    }
                }
            });

            section_title(ui, "가까운 병원");
            let nearby: Vec<_> = HospitalSearch::default()
                .results(&self.seed.hospitals)
                .into_iter()
                .take(2)
                .cloned()
                .collect();
            for hospital in nearby {
                if self.hospital_card(ui, &hospital).clicked() {
                    self.open_hospital(hospital);
                }
            }

            section_title(ui, "최근 방문");
            for visit in self.seed.visits.iter().take(3) {
                ui.horizontal(|ui| {
                    let icon = match visit.kind {
                        VisitKind::Hospital => "🏥",
                        VisitKind::Pharmacy => "💊",
                    };
                    ui.label(icon);
                    ui.label(RichText::new(&visit.name).strong());
                    ui.label(
                        RichText::new(format!("{} {}", visit.visit_date, visit.day_of_week))
                            .color(theme::MUTED),
                    );
                });
            }
            if ui.link("전체 건강 내역 보기").clicked() {
                self.navigate(Page::MedicalHistory);
            }
        });
    }
}

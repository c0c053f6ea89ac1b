use eframe::egui::{self, RichText};
use log::warn;
use wellnest_core::map::MapView;
use wellnest_core::models::{Doctor, Hospital};
use wellnest_core::pages::{HospitalDetailView, SearchFilter};
use wellnest_core::Page;

use super::{header, section_title};
use crate::app::WellnestApp;
use crate::theme;

fn status_color(hospital: &Hospital) -> egui::Color32 {
    if hospital.available_now {
        theme::shade(theme::BRAND, 0.8)
    } else {
        theme::MUTED
    }
}

impl WellnestApp {
    pub(crate) fn hospital_card(&mut self, ui: &mut egui::Ui, hospital: &Hospital) -> egui::Response {
        let frame = egui::Frame::group(ui.style())
            .fill(theme::SURFACE)
            .rounding(12.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    self.show_image(ui, &hospital.image_url, egui::vec2(72.0, 72.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&hospital.name).strong().size(15.0));
                        ui.label(
                            RichText::new(format!("{} · {}", hospital.department, hospital.distance))
                                .color(theme::MUTED),
                        );
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&hospital.status).color(status_color(hospital)));
                            ui.label(format!("⭐ {:.1} ({})", hospital.rating, hospital.reviews));
                        });
                    });
                });
            });
        ui.add_space(6.0);
        ui.interact(
            frame.response.rect,
            ui.id().with(("hospital_card", hospital.id)),
            egui::Sense::click(),
        )
    }

    pub(crate) fn render_hospital_search(&mut self, ui: &mut egui::Ui) {
        if header(ui, Page::Hospital.label()) {
            self.go_back();
            return;
        }
        ui.add(
            egui::TextEdit::singleline(&mut self.pages.search.query)
                .hint_text("병원 이름이나 진료과를 검색하세요")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for filter in SearchFilter::ALL {
                let selected = self.pages.search.filter == filter;
                if ui.selectable_label(selected, filter.label()).clicked() {
                    self.pages.search.filter = filter;
                }
            }
        });
        ui.add_space(8.0);

        let results: Vec<Hospital> = self
            .pages
            .search
            .results(&self.seed.hospitals)
            .into_iter()
            .cloned()
            .collect();
        egui::ScrollArea::vertical().show(ui, |ui| {
            if results.is_empty() {
                ui.label(RichText::new("검색 결과가 없습니다.").color(theme::MUTED));
            }
            for hospital in results {
                if self.hospital_card(ui, &hospital).clicked() {
                    self.open_hospital(hospital);
                }
            }
        });
    }

    pub(crate) fn render_hospital_detail(&mut self, ui: &mut egui::Ui, hospital: &Hospital) {
        if header(ui, Page::HospitalDetail.label()) {
            self.go_back();
            return;
        }
        let view = HospitalDetailView::new(
            hospital,
            self.seed.doctors.clone(),
            self.seed.keywords.clone(),
        );

        egui::ScrollArea::vertical().show(ui, |ui| {
            let width = ui.available_width();
            self.show_image(ui, &hospital.image_url, egui::vec2(width, 180.0));
            ui.add_space(8.0);
            ui.label(RichText::new(&hospital.name).size(20.0).strong());
            ui.horizontal(|ui| {
                ui.label(RichText::new(&hospital.department).color(theme::MUTED));
                ui.label(RichText::new(&hospital.status).color(status_color(hospital)));
                ui.label(format!("⭐ {}", view.rating_label()));
            });
            ui.add_space(8.0);
            egui::Grid::new("hospital_info")
                .num_columns(2)
                .spacing(egui::vec2(12.0, 6.0))
                .show(ui, |ui| {
                    for (label, value) in [
                        ("진료과목", &hospital.specialty_text),
                        ("진료시간", &hospital.hours),
                        ("주소", &hospital.address),
                        ("전화", &hospital.phone),
                    ] {
                        ui.label(RichText::new(label).color(theme::MUTED));
                        ui.label(value);
                        ui.end_row();
                    }
                });
            ui.add_space(6.0);
            ui.label(&hospital.description);

            section_title(ui, "위치");
            self.render_map(ui, &view.map);
            if ui.button("🧭 길찾기").clicked() {
                match view.directions() {
                    Ok(url) => {
                        if let Err(err) = open::that(url.as_str()) {
                            warn!("could not open directions link {url}: {err}");
                        }
                    }
                    Err(err) => warn!("could not build directions link: {err}"),
                }
            }

            section_title(ui, "의료진");
            for doctor in &view.doctors {
                self.doctor_card(ui, doctor);
            }

            section_title(ui, "방문자 리뷰");
            for keyword in &view.keywords {
                ui.horizontal(|ui| {
                    ui.label(&keyword.label);
                    ui.add(
                        egui::ProgressBar::new(f32::from(keyword.percent) / 100.0)
                            .fill(theme::BRAND)
                            .text(format!("{}%", keyword.percent)),
                    );
                });
            }
        });
    }

    fn doctor_card(&mut self, ui: &mut egui::Ui, doctor: &Doctor) {
        ui.horizontal(|ui| {
            self.show_image(ui, &doctor.image, egui::vec2(48.0, 48.0));
            ui.vertical(|ui| {
                ui.label(RichText::new(&doctor.name).strong());
                ui.label(
                    RichText::new(format!("{} · {}", doctor.specialty, doctor.experience))
                        .color(theme::MUTED),
                );
            });
        });
    }

    /// Single OSM tile centred on the marker. Stays blank until the tile
    /// arrives; load failures are only logged.
    fn render_map(&self, ui: &mut egui::Ui, view: &MapView) {
        let size = egui::vec2(ui.available_width(), 180.0);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 8.0, theme::SURFACE);
        let Some(texture) = &self.map.texture else {
            return;
        };
        let tile = view.center_tile();
        let origin = rect.center() - egui::vec2(tile.pixel.0, tile.pixel.1);
        painter.image(
            texture.id(),
            egui::Rect::from_min_size(origin, egui::vec2(256.0, 256.0)),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        painter.circle_filled(rect.center(), 7.0, theme::ALERT);
        painter.circle_stroke(rect.center(), 7.0, egui::Stroke::new(2.0, egui::Color32::WHITE));
        painter.text(
            rect.right_bottom() - egui::vec2(4.0, 4.0),
            egui::Align2::RIGHT_BOTTOM,
            "© OpenStreetMap",
            egui::FontId::proportional(10.0),
            theme::MUTED,
        );
    }
}

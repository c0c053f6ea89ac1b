//! Brand palette and egui visuals.
use std::env;

use eframe::egui::{self, Color32};
use log::{info, warn};

pub const BRAND: Color32 = Color32::from_rgb(0x36, 0xD2, 0xC5);
pub const TEXT: Color32 = Color32::from_rgb(0x1A, 0x1A, 0x1A);
pub const MUTED: Color32 = Color32::from_rgb(0x8A, 0x8A, 0x8A);
pub const SURFACE: Color32 = Color32::from_rgb(0xF7, 0xF8, 0xFA);
pub const ALERT: Color32 = Color32::from_rgb(0xE5, 0x48, 0x4D);

/// Convert RGB to HSV.
/// Returns (hue [0-360], saturation [0-1], value [0-1])
fn rgb_to_hsv(color: Color32) -> (f32, f32, f32) {
    let r = color.r() as f32 / 255.0;
    let g = color.g() as f32 / 255.0;
    let b = color.b() as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Color32 {
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match hue {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color32::from_rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// Same hue, brightness scaled by `factor`.
pub fn shade(color: Color32, factor: f32) -> Color32 {
    let (hue, sat, val) = rgb_to_hsv(color);
    hsv_to_rgb(hue, sat, (val * factor).clamp(0.0, 1.0))
}

/// Same hue, saturation scaled by `factor`; used for chip backgrounds.
pub fn wash(color: Color32, factor: f32) -> Color32 {
    let (hue, sat, val) = rgb_to_hsv(color);
    hsv_to_rgb(hue, (sat * factor).clamp(0.0, 1.0), val.max(0.97))
}

pub fn apply(ctx: &egui::Context) {
    install_fonts(ctx);

    let mut visuals = egui::Visuals::light();
    visuals.selection.bg_fill = BRAND;
    visuals.selection.stroke = egui::Stroke::new(1.0, shade(BRAND, 0.7));
    visuals.hyperlink_color = shade(BRAND, 0.8);
    visuals.widgets.active.bg_fill = shade(BRAND, 0.85);
    visuals.widgets.hovered.weak_bg_fill = wash(BRAND, 0.25);
    visuals.panel_fill = Color32::WHITE;
    visuals.window_fill = Color32::WHITE;
    visuals.extreme_bg_color = SURFACE;
    visuals.override_text_color = Some(TEXT);
    ctx.set_visuals(visuals);
}

/// Default egui fonts carry no Hangul glyphs; `WELLNEST_FONT` may point at a
/// TTF/OTF that does.
fn install_fonts(ctx: &egui::Context) {
    let Ok(path) = env::var("WELLNEST_FONT") else {
        return;
    };
    match std::fs::read(&path) {
        Ok(bytes) => {
            let mut fonts = egui::FontDefinitions::default();
            fonts
                .font_data
                .insert("hangul".into(), egui::FontData::from_owned(bytes));
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .insert(0, "hangul".into());
            }
            ctx.set_fonts(fonts);
            info!("loaded UI font from {path}");
        }
        Err(err) => warn!("could not read font {path}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_round_trip_is_stable() {
        for color in [BRAND, TEXT, ALERT, Color32::from_rgb(12, 200, 90)] {
            let (h, s, v) = rgb_to_hsv(color);
            assert_eq!(hsv_to_rgb(h, s, v), color);
        }
    }

    #[test]
    fn shade_darkens_without_changing_hue() {
        let dark = shade(BRAND, 0.6);
        let (h1, _, v1) = rgb_to_hsv(BRAND);
        let (h2, _, v2) = rgb_to_hsv(dark);
        assert!(v2 < v1);
        assert!((h1 - h2).abs() < 2.0);
    }

    #[test]
    fn wash_is_lighter_than_brand() {
        let (_, s1, _) = rgb_to_hsv(BRAND);
        let (_, s2, v2) = rgb_to_hsv(wash(BRAND, 0.2));
        assert!(s2 < s1);
        assert!(v2 >= 0.96);
    }
}

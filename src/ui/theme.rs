use eframe::egui::{self, Color32, Stroke, Visuals};

const WINDOW_BG: Color32 = Color32::from_rgb(43, 43, 43);
const BASE_BG: Color32 = Color32::from_rgb(25, 25, 25);
const BUTTON_BG: Color32 = Color32::from_rgb(68, 68, 68);
const BUTTON_HOVER: Color32 = Color32::from_rgb(85, 85, 85);
const SLIDER_HANDLE: Color32 = Color32::from_rgb(136, 136, 136);
const TEXT: Color32 = Color32::from_rgb(221, 221, 221);
const ACCENT: Color32 = Color32::from_rgb(42, 130, 218);

/// Dark palette for the player window.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = WINDOW_BG;
    visuals.panel_fill = WINDOW_BG;
    visuals.extreme_bg_color = BASE_BG;
    visuals.override_text_color = Some(TEXT);
    visuals.hyperlink_color = ACCENT;

    visuals.widgets.inactive.weak_bg_fill = BUTTON_BG;
    visuals.widgets.inactive.bg_fill = SLIDER_HANDLE;
    visuals.widgets.inactive.bg_stroke = Stroke::NONE;
    visuals.widgets.hovered.weak_bg_fill = BUTTON_HOVER;
    visuals.widgets.hovered.bg_fill = BUTTON_HOVER;
    visuals.widgets.active.weak_bg_fill = BUTTON_HOVER;

    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, Color32::BLACK);

    ctx.set_visuals(visuals);
}

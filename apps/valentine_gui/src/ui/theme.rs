//! Pink/rose palette and the light visuals the screens are painted with.

use egui::{Color32, Mesh, Painter, Rect};

pub const PINK_100: Color32 = Color32::from_rgb(252, 231, 243);
pub const ROSE_50: Color32 = Color32::from_rgb(255, 241, 242);
pub const RED_50: Color32 = Color32::from_rgb(254, 242, 242);
pub const ROSE_200: Color32 = Color32::from_rgb(254, 205, 211);
pub const ROSE_300: Color32 = Color32::from_rgb(253, 164, 175);
pub const ROSE_400: Color32 = Color32::from_rgb(251, 113, 133);
pub const ROSE_500: Color32 = Color32::from_rgb(244, 63, 94);
pub const ROSE_600: Color32 = Color32::from_rgb(225, 29, 72);
pub const ROSE_700: Color32 = Color32::from_rgb(190, 18, 60);
pub const PINK_200: Color32 = Color32::from_rgb(251, 207, 232);
pub const PINK_500: Color32 = Color32::from_rgb(236, 72, 153);

pub fn lighten_color(c: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::light();
    visuals.override_text_color = Some(ROSE_700);
    visuals.panel_fill = Color32::TRANSPARENT;
    visuals.window_fill = ROSE_50;
    visuals.extreme_bg_color = RED_50;
    visuals.faint_bg_color = PINK_100;
    visuals.hyperlink_color = ROSE_600;
    visuals.selection.bg_fill = ROSE_400;
    visuals.widgets.inactive.weak_bg_fill = Color32::WHITE;
    visuals.widgets.hovered.weak_bg_fill = lighten_color(ROSE_200, 0.5);
    visuals.widgets.active.weak_bg_fill = ROSE_200;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, PINK_200);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ROSE_300);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.2, ROSE_400);
    visuals.window_corner_radius = egui::CornerRadius::same(16);
    visuals
}

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = visuals();
    style.spacing.item_spacing = egui::vec2(10.0, 12.0);
    style.spacing.button_padding = egui::vec2(18.0, 10.0);
    ctx.set_style(style);
}

/// Diagonal pink-to-rose-to-red wash filling `rect`.
pub fn paint_background(painter: &Painter, rect: Rect) {
    let mut mesh = Mesh::default();
    let corners = [
        (rect.left_top(), PINK_100),
        (rect.right_top(), ROSE_50),
        (rect.right_bottom(), RED_50),
        (rect.left_bottom(), ROSE_50),
    ];
    for (pos, color) in corners {
        mesh.colored_vertex(pos, color);
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

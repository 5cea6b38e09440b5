use caliper_core::geometry::Point;

use crate::app::CaliperApp;

const MARKER_RADIUS: f32 = 5.0;

/// Magnified view window. One click inside it picks the refined point;
/// closing it (or Escape) abandons the current pair.
pub fn show(ctx: &egui::Context, app: &mut CaliperApp) {
    let (Some(view), Some(texture)) = (app.magnifier.view.as_ref(), app.magnifier.texture.as_ref())
    else {
        return;
    };

    let side = view.size() as f32;
    let marker = view.marker_position();
    let raw = view.raw_point();
    let texture_id = texture.id();

    let mut open = true;
    let mut picked: Option<Point> = None;

    egui::Window::new("Magnified View")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let response = ui.add(
                egui::Image::new(egui::load::SizedTexture::new(
                    texture_id,
                    egui::vec2(side, side),
                ))
                .sense(egui::Sense::click()),
            );
            let img_rect = response.rect;
            let to_view = side / img_rect.width();

            let marker_screen = img_rect.min
                + egui::vec2(marker.x as f32 / to_view, marker.y as f32 / to_view);
            ui.painter().circle_stroke(
                marker_screen,
                MARKER_RADIUS,
                egui::Stroke::new(1.5, egui::Color32::RED),
            );

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let rel = (pos - img_rect.min) * to_view;
                    picked = Some(Point::new(rel.x as f64, rel.y as f64));
                }
            }

            ui.small(format!(
                "Around ({:.0}, {:.0}). Click the exact point; Esc to cancel",
                raw.x, raw.y
            ));
        });

    if let Some(click) = picked {
        app.resolve_magnifier_click(click);
    } else if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.dismiss_magnifier();
    }
}

use caliper_core::geometry::{PixelRect, Point};
use caliper_core::refine::safe_zone;

use crate::app::CaliperApp;

const MARK_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const PENDING_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const SAFE_ZONE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);

/// Convert screen coordinates to image pixel coordinates.
pub fn screen_to_image(
    pos: egui::Pos2,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) -> egui::Pos2 {
    egui::pos2(
        (pos.x - img_rect.left()) / img_rect.width() * image_size.x,
        (pos.y - img_rect.top()) / img_rect.height() * image_size.y,
    )
}

/// Convert image pixel coordinates to screen coordinates.
fn image_to_screen(
    pos: egui::Pos2,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) -> egui::Pos2 {
    egui::pos2(
        pos.x / image_size.x * img_rect.width() + img_rect.left(),
        pos.y / image_size.y * img_rect.height() + img_rect.top(),
    )
}

/// Screen position of the centre of the pixel a refined point names.
fn pixel_centre_to_screen(p: Point, img_rect: egui::Rect, image_size: egui::Vec2) -> egui::Pos2 {
    image_to_screen(
        egui::pos2(p.x as f32 + 0.5, p.y as f32 + 0.5),
        img_rect,
        image_size,
    )
}

/// A primary click on the image opens the magnifier around it.
pub fn handle_measure_click(
    ctx: &egui::Context,
    response: &egui::Response,
    ui: &egui::Ui,
    app: &mut CaliperApp,
    img_rect: egui::Rect,
    image_size: egui::Vec2,
) {
    if let Some(hover) = ui.input(|i| i.pointer.hover_pos()) {
        if img_rect.contains(hover) && response.rect.contains(hover) {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
    }

    let command = ui.input(|i| i.modifiers.command);
    let clicked = [egui::PointerButton::Primary, egui::PointerButton::Middle]
        .into_iter()
        .find(|&b| response.clicked_by(b));
    if !clicked.is_some_and(|b| opens_magnifier(b, command)) {
        return;
    }
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };
    if !img_rect.contains(pos) {
        return;
    }

    let img_pos = screen_to_image(pos, img_rect, image_size);
    app.open_magnifier(ctx, Point::new(img_pos.x as f64, img_pos.y as f64));
}

/// Only a plain primary click picks a point. Middle clicks fit the view and
/// Ctrl+primary pans.
fn opens_magnifier(button: egui::PointerButton, command: bool) -> bool {
    button == egui::PointerButton::Primary && !command
}

/// Draw safe zone, recorded segments, point marks and the half-finished pair.
pub fn draw_overlay(ui: &egui::Ui, app: &CaliperApp, img_rect: egui::Rect, image_size: egui::Vec2) {
    let painter = ui.painter();

    if app.config.show_safe_zone {
        if let Some(zone) = safe_zone(
            image_size.x as u32,
            image_size.y as u32,
            app.refiner.crop_size(),
        ) {
            draw_safe_zone(ui, zone, img_rect, image_size);
        }
    }

    let zoom = img_rect.width() / image_size.x;

    for segment in app.session.segments() {
        let a = pixel_centre_to_screen(segment.start, img_rect, image_size);
        let b = pixel_centre_to_screen(segment.end, img_rect, image_size);
        painter.line_segment([a, b], egui::Stroke::new(2.0, MARK_COLOR));
    }

    let radius = (app.config.marker_radius * zoom).max(2.0);
    for &mark in app.session.marks() {
        let c = pixel_centre_to_screen(mark, img_rect, image_size);
        painter.circle_filled(c, radius, MARK_COLOR);
    }

    if let Some(p) = app.session.buffered_point() {
        let c = pixel_centre_to_screen(p, img_rect, image_size);
        painter.circle_stroke(c, radius + 3.0, egui::Stroke::new(1.5, PENDING_COLOR));
    }
    if let Some(pair) = app.session.pending_calibration() {
        let a = pixel_centre_to_screen(pair.start, img_rect, image_size);
        let b = pixel_centre_to_screen(pair.end, img_rect, image_size);
        painter.line_segment([a, b], egui::Stroke::new(1.5, PENDING_COLOR));
    }
}

fn draw_safe_zone(ui: &egui::Ui, zone: PixelRect, img_rect: egui::Rect, image_size: egui::Vec2) {
    let tl = image_to_screen(egui::pos2(zone.x as f32, zone.y as f32), img_rect, image_size);
    let br = image_to_screen(
        egui::pos2(zone.right() as f32, zone.bottom() as f32),
        img_rect,
        image_size,
    );
    let corners = [
        tl,
        egui::pos2(br.x, tl.y),
        br,
        egui::pos2(tl.x, br.y),
        tl,
    ];
    ui.painter().extend(egui::Shape::dashed_line(
        &corners,
        egui::Stroke::new(2.0, SAFE_ZONE_COLOR),
        4.0,
        4.0,
    ));
}

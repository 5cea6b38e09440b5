/// Wrap an RGBA8 buffer as an egui ColorImage.
pub fn rgba_to_color_image(width: u32, height: u32, rgba: &[u8]) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], rgba)
}

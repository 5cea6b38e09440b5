/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Source image size in pixels.
    pub image_size: Option<[usize; 2]>,
    pub zoom: f32,
    pub pan_offset: egui::Vec2,
    /// Fit the next frame's image to the panel (set after loading).
    pub fit_requested: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            image_size: None,
            zoom: 1.0,
            pan_offset: egui::Vec2::ZERO,
            fit_requested: false,
        }
    }
}

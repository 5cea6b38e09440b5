use caliper_core::refine::MagnifiedView;

/// The open magnified view, if any, and its texture.
#[derive(Default)]
pub struct MagnifierState {
    pub view: Option<MagnifiedView>,
    pub texture: Option<egui::TextureHandle>,
}

impl MagnifierState {
    pub fn is_open(&self) -> bool {
        self.view.is_some()
    }

    /// Release the view and its texture.
    pub fn close(&mut self) -> Option<MagnifiedView> {
        self.texture = None;
        self.view.take()
    }
}

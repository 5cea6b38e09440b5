mod magnifier;
mod prompt;
mod ui;
mod viewport;

pub use magnifier::MagnifierState;
pub use prompt::ScalePromptState;
pub use ui::UIState;
pub use viewport::ViewportState;

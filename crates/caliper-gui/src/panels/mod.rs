pub mod magnifier;
pub mod measure_overlay;
pub mod measurements;
pub mod menu_bar;
pub mod scale_prompt;
pub mod status;
pub mod viewport;

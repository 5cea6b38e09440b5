//! The seam between the measuring core and whatever presents it.

use crate::geometry::Point;
use crate::refine::MagnifiedView;
use crate::session::ScaleFactor;
use crate::store::{Measurement, Statistics};

/// Receives state changes from a [`Session`](crate::session::Session).
pub trait SessionObserver {
    fn on_scale_set(&mut self, scale: ScaleFactor);
    fn on_measurement_added(&mut self, measurement: &Measurement, statistics: &Statistics);
}

/// No-op observer for callers that poll the session instead.
impl SessionObserver for () {
    fn on_scale_set(&mut self, _scale: ScaleFactor) {}
    fn on_measurement_added(&mut self, _measurement: &Measurement, _statistics: &Statistics) {}
}

/// A frontend able to answer modal requests synchronously.
///
/// Used by [`Session::handle_click`](crate::session::Session::handle_click).
/// Immediate-mode frontends that cannot block drive the split-phase API
/// (`submit_point` / `complete_calibration`) instead.
pub trait PresentationBridge: SessionObserver {
    /// Ask for the real-world length (µm) between the two calibration points.
    /// `None` means the prompt was dismissed.
    fn request_scale_length(&mut self, pixel_distance: f64) -> Option<f64>;

    /// Present the magnified view and return the click inside it, in view
    /// coordinates. `None` means the view was closed without a click.
    fn request_magnified_click(&mut self, view: &MagnifiedView) -> Option<Point>;
}

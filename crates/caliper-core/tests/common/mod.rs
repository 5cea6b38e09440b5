use std::collections::VecDeque;

use caliper_core::bridge::{PresentationBridge, SessionObserver};
use caliper_core::geometry::Point;
use caliper_core::refine::MagnifiedView;
use caliper_core::session::ScaleFactor;
use caliper_core::source::SourceImage;
use caliper_core::store::{Measurement, Statistics};
use image::{Rgba, RgbaImage};

/// Image whose pixel at (x, y) encodes its own coordinates in R and G.
pub fn coordinate_image(width: u32, height: u32) -> SourceImage {
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
    });
    SourceImage::new(pixels)
}

/// How the scripted user answers the magnifier.
#[derive(Clone, Copy, Debug)]
pub enum MagnifierReply {
    /// Click the ring drawn over the raw point.
    OnMarker,
    /// Click at an explicit view position.
    At(Point),
    Close,
}

/// Bridge that answers requests from queues and records notifications.
#[derive(Default)]
pub struct ScriptedBridge {
    pub magnifier_replies: VecDeque<MagnifierReply>,
    pub length_replies: VecDeque<Option<f64>>,
    pub scale_events: Vec<ScaleFactor>,
    pub measurement_events: Vec<(Measurement, Statistics)>,
    pub length_requests: Vec<f64>,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lengths(lengths: &[Option<f64>]) -> Self {
        Self {
            length_replies: lengths.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl SessionObserver for ScriptedBridge {
    fn on_scale_set(&mut self, scale: ScaleFactor) {
        self.scale_events.push(scale);
    }

    fn on_measurement_added(&mut self, measurement: &Measurement, statistics: &Statistics) {
        self.measurement_events.push((*measurement, *statistics));
    }
}

impl PresentationBridge for ScriptedBridge {
    fn request_scale_length(&mut self, pixel_distance: f64) -> Option<f64> {
        self.length_requests.push(pixel_distance);
        self.length_replies.pop_front().flatten()
    }

    fn request_magnified_click(&mut self, view: &MagnifiedView) -> Option<Point> {
        match self.magnifier_replies.pop_front().unwrap_or(MagnifierReply::OnMarker) {
            MagnifierReply::OnMarker => Some(view.marker_position()),
            MagnifierReply::At(p) => Some(p),
            MagnifierReply::Close => None,
        }
    }
}

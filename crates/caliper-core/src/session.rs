//! Two-phase calibration / measurement state machine.
//!
//! A session starts out calibrating. The first pair of refined points plus a
//! reference length fixes the scale; from then on every pair of points records
//! one measurement. There is no way back to calibrating.

use std::fmt;

use crate::bridge::{PresentationBridge, SessionObserver};
use crate::error::{CaliperError, Result};
use crate::geometry::{Point, Segment};
use crate::refine::Refiner;
use crate::source::SourceImage;
use crate::store::{Measurement, MeasurementStore, Statistics};

/// Real-world micrometres per source pixel. Always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// `length / pixel_distance`, guarded against coincident points.
    pub fn from_reference(length: f64, pixel_distance: f64) -> Result<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(CaliperError::InvalidScaleLength(length));
        }
        if pixel_distance <= 0.0 {
            return Err(CaliperError::DegenerateScale);
        }
        Ok(Self(length / pixel_distance))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn to_real(&self, pixel_distance: f64) -> f64 {
        pixel_distance * self.0
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} μm/px", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Calibrating,
    Measuring,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calibrating => write!(f, "Calibrating"),
            Self::Measuring => write!(f, "Measuring"),
        }
    }
}

/// Holds at most one point; the second push hands back the pair and empties it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointBuffer {
    first: Option<Point>,
}

impl PointBuffer {
    pub fn push(&mut self, p: Point) -> Option<Segment> {
        match self.first.take() {
            Some(start) => Some(Segment { start, end: p }),
            None => {
                self.first = Some(p);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.first.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn first(&self) -> Option<Point> {
        self.first
    }

    pub fn clear(&mut self) {
        self.first = None;
    }
}

#[derive(Clone, Debug)]
enum Phase {
    Calibrating {
        buffer: PointBuffer,
        /// Completed pair waiting for the reference length.
        pending: Option<Segment>,
    },
    Measuring {
        scale: ScaleFactor,
        buffer: PointBuffer,
    },
}

/// What a submitted point led to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// First point of a pair stored.
    Buffered { mode: Mode },
    /// Calibration pair complete; a reference length is needed.
    ScaleLengthRequested { pixel_distance: f64 },
    /// Calibration finished (only produced by [`Session::handle_click`]).
    ScaleSet(ScaleFactor),
    MeasurementAdded(Measurement),
}

/// One user's measuring session over one image.
#[derive(Clone, Debug)]
pub struct Session {
    phase: Phase,
    store: MeasurementStore,
    marks: Vec<Point>,
    segments: Vec<Segment>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Calibrating {
                buffer: PointBuffer::default(),
                pending: None,
            },
            store: MeasurementStore::new(),
            marks: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.phase {
            Phase::Calibrating { .. } => Mode::Calibrating,
            Phase::Measuring { .. } => Mode::Measuring,
        }
    }

    pub fn scale_factor(&self) -> Option<ScaleFactor> {
        match self.phase {
            Phase::Measuring { scale, .. } => Some(scale),
            Phase::Calibrating { .. } => None,
        }
    }

    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    pub fn measurements(&self) -> &[Measurement] {
        self.store.all()
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.store.statistics()
    }

    /// Every refined point accepted so far, in submission order.
    pub fn marks(&self) -> &[Point] {
        &self.marks
    }

    /// Endpoints of each recorded measurement, parallel to [`Session::measurements`].
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The half-finished pair of the active phase, if any.
    pub fn buffered_point(&self) -> Option<Point> {
        self.active_buffer().first()
    }

    /// Calibration pair awaiting a reference length.
    pub fn pending_calibration(&self) -> Option<Segment> {
        match self.phase {
            Phase::Calibrating { pending, .. } => pending,
            Phase::Measuring { .. } => None,
        }
    }

    fn active_buffer(&self) -> &PointBuffer {
        match &self.phase {
            Phase::Calibrating { buffer, .. } | Phase::Measuring { buffer, .. } => buffer,
        }
    }

    /// Feed one refined point into the active phase.
    pub fn submit_point<O: SessionObserver + ?Sized>(
        &mut self,
        point: Point,
        observer: &mut O,
    ) -> Result<SubmitOutcome> {
        match &mut self.phase {
            Phase::Calibrating { pending: Some(_), .. } => Err(CaliperError::AwaitingScaleLength),
            Phase::Calibrating { buffer, pending } => {
                self.marks.push(point);
                let Some(pair) = buffer.push(point) else {
                    tracing::debug!("Calibration point 1 at ({:.1}, {:.1})", point.x, point.y);
                    return Ok(SubmitOutcome::Buffered {
                        mode: Mode::Calibrating,
                    });
                };

                let pixel_distance = pair.pixel_length();
                if pixel_distance == 0.0 {
                    tracing::warn!("Calibration points coincide; discarding pair");
                    return Err(CaliperError::DegenerateScale);
                }

                *pending = Some(pair);
                tracing::debug!("Calibration pair complete: {pixel_distance:.2}px");
                Ok(SubmitOutcome::ScaleLengthRequested { pixel_distance })
            }
            Phase::Measuring { scale, buffer } => {
                self.marks.push(point);
                let Some(pair) = buffer.push(point) else {
                    return Ok(SubmitOutcome::Buffered {
                        mode: Mode::Measuring,
                    });
                };

                let real = scale.to_real(pair.pixel_length());
                let measurement = self.store.append(real);
                self.segments.push(pair);
                tracing::info!("Measurement #{}: {:.2} μm", measurement.id, measurement.value);

                if let Some(stats) = self.store.statistics() {
                    observer.on_measurement_added(&measurement, &stats);
                }
                Ok(SubmitOutcome::MeasurementAdded(measurement))
            }
        }
    }

    /// Answer a [`SubmitOutcome::ScaleLengthRequested`] with the reference length.
    ///
    /// An invalid length leaves the request open so the caller can ask again.
    pub fn complete_calibration<O: SessionObserver + ?Sized>(
        &mut self,
        length: f64,
        observer: &mut O,
    ) -> Result<ScaleFactor> {
        let Phase::Calibrating {
            pending: Some(pair),
            ..
        } = self.phase
        else {
            return Err(CaliperError::NoPendingCalibration);
        };

        let scale = ScaleFactor::from_reference(length, pair.pixel_length())?;
        self.phase = Phase::Measuring {
            scale,
            buffer: PointBuffer::default(),
        };
        tracing::info!("Scale set: {scale}");
        observer.on_scale_set(scale);
        Ok(scale)
    }

    /// Drop a pending calibration pair. Returns `false` if none was pending.
    pub fn cancel_calibration(&mut self) -> bool {
        match &mut self.phase {
            Phase::Calibrating { buffer, pending } => {
                buffer.clear();
                pending.take().is_some()
            }
            Phase::Measuring { .. } => false,
        }
    }

    /// Abandon the step in progress: empties the active buffer and any pending
    /// calibration. Mode, scale and recorded measurements are untouched.
    pub fn abandon_step(&mut self) {
        match &mut self.phase {
            Phase::Calibrating { buffer, pending } => {
                buffer.clear();
                *pending = None;
            }
            Phase::Measuring { buffer, .. } => buffer.clear(),
        }
    }

    /// Run one raw click through magnifier, state machine and (if needed) the
    /// scale prompt, answering every request through `bridge`.
    pub fn handle_click<B: PresentationBridge + ?Sized>(
        &mut self,
        raw: Point,
        image: &SourceImage,
        refiner: &Refiner,
        bridge: &mut B,
    ) -> Result<SubmitOutcome> {
        let view = refiner.refine(raw, image)?;

        let Some(click) = bridge.request_magnified_click(&view) else {
            self.abandon_step();
            return Err(CaliperError::UserCancelled);
        };
        let refined = view.resolve(click);

        match self.submit_point(refined, bridge)? {
            SubmitOutcome::ScaleLengthRequested { pixel_distance } => {
                let Some(length) = bridge.request_scale_length(pixel_distance) else {
                    self.cancel_calibration();
                    return Err(CaliperError::UserCancelled);
                };
                match self.complete_calibration(length, bridge) {
                    Ok(scale) => Ok(SubmitOutcome::ScaleSet(scale)),
                    Err(e) => {
                        self.cancel_calibration();
                        Err(e)
                    }
                }
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_buffer_never_holds_two() {
        let mut buf = PointBuffer::default();
        assert!(buf.push(Point::new(1.0, 1.0)).is_none());
        assert_eq!(buf.len(), 1);
        let pair = buf.push(Point::new(4.0, 5.0)).unwrap();
        assert_eq!(pair.start, Point::new(1.0, 1.0));
        assert_eq!(pair.end, Point::new(4.0, 5.0));
        assert!(buf.is_empty());
    }

    #[test]
    fn scale_factor_rejects_bad_lengths() {
        assert!(matches!(
            ScaleFactor::from_reference(0.0, 10.0),
            Err(CaliperError::InvalidScaleLength(_))
        ));
        assert!(matches!(
            ScaleFactor::from_reference(f64::NAN, 10.0),
            Err(CaliperError::InvalidScaleLength(_))
        ));
        assert!(matches!(
            ScaleFactor::from_reference(5.0, 0.0),
            Err(CaliperError::DegenerateScale)
        ));
    }
}

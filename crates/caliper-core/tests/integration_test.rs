#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;

use caliper_core::error::CaliperError;
use caliper_core::export::{render, ExportFormat};
use caliper_core::geometry::Point;
use caliper_core::refine::Refiner;
use caliper_core::session::{Mode, Session, SubmitOutcome};

use common::{MagnifierReply, ScriptedBridge};

#[test]
fn test_calibrate_then_measure_end_to_end() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();
    let mut session = Session::new();
    let mut bridge = ScriptedBridge::with_lengths(&[Some(100.0)]);

    let outcome = session
        .handle_click(Point::new(10.0, 10.0), &image, &refiner, &mut bridge)
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Buffered { mode: Mode::Calibrating });
    assert_eq!(session.marks(), &[Point::new(10.0, 10.0)]);

    let outcome = session
        .handle_click(Point::new(110.0, 10.0), &image, &refiner, &mut bridge)
        .unwrap();
    let SubmitOutcome::ScaleSet(scale) = outcome else {
        panic!("expected scale to be set, got {outcome:?}");
    };
    assert_relative_eq!(scale.value(), 1.0);
    assert_eq!(bridge.length_requests, vec![100.0]);
    assert_eq!(session.mode(), Mode::Measuring);

    session
        .handle_click(Point::new(10.0, 60.0), &image, &refiner, &mut bridge)
        .unwrap();
    let outcome = session
        .handle_click(Point::new(10.0, 160.0), &image, &refiner, &mut bridge)
        .unwrap();
    let SubmitOutcome::MeasurementAdded(m) = outcome else {
        panic!("expected a measurement, got {outcome:?}");
    };
    assert_eq!(m.id, 1);
    assert_relative_eq!(m.value, 100.0);

    let text = render(session.store(), ExportFormat::Clipboard).unwrap();
    assert!(text.ends_with("1\t100.00\n"));
    assert_eq!(bridge.scale_events.len(), 1);
    assert_eq!(bridge.measurement_events.len(), 1);
}

#[test]
fn test_refined_click_moves_point() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();
    let mut session = Session::new();
    let mut bridge = ScriptedBridge::new();
    // Centre of the view is the raw point; 3 magnified pixels right is +3 source px.
    bridge
        .magnifier_replies
        .push_back(MagnifierReply::At(Point::new(140.0, 125.0)));

    session
        .handle_click(Point::new(100.0, 100.0), &image, &refiner, &mut bridge)
        .unwrap();
    assert_eq!(session.buffered_point(), Some(Point::new(103.0, 100.0)));
}

#[test]
fn test_closing_magnifier_abandons_step() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();
    let mut session = Session::new();
    let mut bridge = ScriptedBridge::new();
    bridge.magnifier_replies.push_back(MagnifierReply::OnMarker);
    bridge.magnifier_replies.push_back(MagnifierReply::Close);

    session
        .handle_click(Point::new(20.0, 20.0), &image, &refiner, &mut bridge)
        .unwrap();
    let err = session
        .handle_click(Point::new(80.0, 20.0), &image, &refiner, &mut bridge)
        .unwrap_err();
    assert!(matches!(err, CaliperError::UserCancelled));
    assert!(session.buffered_point().is_none());
    assert!(bridge.length_requests.is_empty());
}

#[test]
fn test_cancelled_scale_prompt_stays_calibrating() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();
    let mut session = Session::new();
    let mut bridge = ScriptedBridge::with_lengths(&[None, Some(50.0)]);

    for raw in [Point::new(20.0, 20.0), Point::new(70.0, 20.0)] {
        let _ = session.handle_click(raw, &image, &refiner, &mut bridge);
    }
    assert_eq!(session.mode(), Mode::Calibrating);
    assert!(session.pending_calibration().is_none());
    assert!(bridge.scale_events.is_empty());

    for raw in [Point::new(20.0, 20.0), Point::new(70.0, 20.0)] {
        session.handle_click(raw, &image, &refiner, &mut bridge).unwrap();
    }
    assert_eq!(session.mode(), Mode::Measuring);
    assert_relative_eq!(session.scale_factor().unwrap().value(), 1.0);
}

#[test]
fn test_invalid_length_from_prompt_resets_calibration() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();
    let mut session = Session::new();
    let mut bridge = ScriptedBridge::with_lengths(&[Some(-1.0)]);

    session
        .handle_click(Point::new(20.0, 20.0), &image, &refiner, &mut bridge)
        .unwrap();
    let err = session
        .handle_click(Point::new(70.0, 20.0), &image, &refiner, &mut bridge)
        .unwrap_err();
    assert!(matches!(err, CaliperError::InvalidScaleLength(_)));
    assert!(session.pending_calibration().is_none());
    assert_eq!(session.mode(), Mode::Calibrating);
}

#[test]
fn test_small_image_discards_raw_click() {
    let image = common::coordinate_image(30, 30);
    let refiner = Refiner::default();
    let mut session = Session::new();
    let mut bridge = ScriptedBridge::new();

    let err = session
        .handle_click(Point::new(5.0, 5.0), &image, &refiner, &mut bridge)
        .unwrap_err();
    assert!(matches!(err, CaliperError::InvalidRegion { .. }));
    assert!(session.marks().is_empty());
}

#[test]
fn test_load_image_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.png");
    common::coordinate_image(64, 48).pixels.save(&path).unwrap();

    let loaded = caliper_core::source::load_image(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (64, 48));
    assert_eq!(loaded.pixel(10, 20).0, [10, 20, 0, 255]);
    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
}

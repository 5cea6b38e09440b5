#[allow(dead_code)]
mod common;

use caliper_core::error::CaliperError;
use caliper_core::geometry::{PixelRect, Point};
use caliper_core::refine::{safe_zone, Refiner};

fn window(x: u32, y: u32) -> PixelRect {
    PixelRect {
        x,
        y,
        width: 50,
        height: 50,
    }
}

// ---------------------------------------------------------------------------
// Crop window selection
// ---------------------------------------------------------------------------

#[test]
fn test_window_centred_away_from_edges() {
    let refiner = Refiner::default();
    let w = refiner.crop_window(Point::new(100.0, 100.0), 200, 200).unwrap();
    assert_eq!(w, window(75, 75));
}

#[test]
fn test_window_shifted_at_top_left() {
    let refiner = Refiner::default();
    let w = refiner.crop_window(Point::new(10.0, 10.0), 200, 200).unwrap();
    assert_eq!(w, window(0, 0));
    assert_eq!((w.right(), w.bottom()), (50, 50));
}

#[test]
fn test_window_shifted_at_bottom_right() {
    let refiner = Refiner::default();
    let w = refiner.crop_window(Point::new(190.0, 190.0), 200, 200).unwrap();
    assert_eq!(w, window(150, 150));
    assert_eq!((w.right(), w.bottom()), (200, 200));
}

#[test]
fn test_window_shifted_on_one_axis_only() {
    let refiner = Refiner::default();
    let w = refiner.crop_window(Point::new(5.0, 120.0), 200, 200).unwrap();
    assert_eq!(w, window(0, 95));
}

#[test]
fn test_window_exactly_image_sized() {
    let refiner = Refiner::default();
    let w = refiner.crop_window(Point::new(49.0, 0.0), 50, 50).unwrap();
    assert_eq!(w, window(0, 0));
}

#[test]
fn test_image_smaller_than_crop_is_invalid_region() {
    let refiner = Refiner::default();
    let err = refiner.crop_window(Point::new(10.0, 10.0), 40, 300).unwrap_err();
    assert!(matches!(
        err,
        CaliperError::InvalidRegion {
            width: 40,
            height: 300,
            crop_size: 50
        }
    ));

    let image = common::coordinate_image(300, 49);
    assert!(refiner.refine(Point::new(10.0, 10.0), &image).is_err());
}

#[test]
fn test_refiner_rejects_bad_parameters() {
    assert!(Refiner::new(1, 5).is_err());
    assert!(Refiner::new(50, 0).is_err());
    assert!(Refiner::new(2, 1).is_ok());
    assert!(Refiner::new(50, 100_000_000).is_err());
    assert!(Refiner::new(u32::MAX, 2).is_err());
}

// ---------------------------------------------------------------------------
// Magnified view
// ---------------------------------------------------------------------------

#[test]
fn test_magnified_view_is_nearest_neighbour() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();
    let view = refiner.refine(Point::new(100.0, 100.0), &image).unwrap();

    assert_eq!(view.size(), 250);
    // View pixels 0..5 all come from source pixel (75, 75).
    for v in 0..5 {
        assert_eq!(view.pixels().get_pixel(v, v).0, [75, 75, 0, 255]);
    }
    assert_eq!(view.pixels().get_pixel(5, 0).0, [76, 75, 0, 255]);
    assert_eq!(view.pixels().get_pixel(249, 249).0, [124, 124, 0, 255]);
    assert_eq!(view.rgba_bytes().len(), 250 * 250 * 4);
}

#[test]
fn test_marker_sits_over_raw_pixel_when_shifted() {
    let image = common::coordinate_image(200, 200);
    let view = Refiner::default()
        .refine(Point::new(10.0, 190.0), &image)
        .unwrap();
    assert_eq!(view.window(), window(0, 150));
    let marker = view.marker_position();
    assert_eq!(marker, Point::new(52.5, 202.5));
}

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

#[test]
fn test_centre_click_maps_back_to_raw_point() {
    let image = common::coordinate_image(200, 200);
    let view = Refiner::default()
        .refine(Point::new(100.0, 80.0), &image)
        .unwrap();
    let centre = view.size() as f64 / 2.0;
    assert_eq!(view.resolve(Point::new(centre, centre)), Point::new(100.0, 80.0));
}

#[test]
fn test_centre_click_on_shifted_view_names_pixel_under_cursor() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();

    // Window pinned to (0, 0): the view centre sits over source (25, 25), not the raw click.
    let view = refiner.refine(Point::new(10.0, 10.0), &image).unwrap();
    assert_eq!(view.raw_point(), Point::new(10.0, 10.0));
    let centre = view.size() as f64 / 2.0;
    assert_eq!(view.marker_position(), Point::new(52.5, 52.5));
    assert_eq!(view.pixels().get_pixel(125, 125).0, [25, 25, 0, 255]);
    assert_eq!(view.resolve(Point::new(centre, centre)), Point::new(25.0, 25.0));

    let view = refiner.refine(Point::new(190.0, 190.0), &image).unwrap();
    assert_eq!(view.resolve(Point::new(centre, centre)), Point::new(175.0, 175.0));
}

#[test]
fn test_resolve_offsets_by_whole_source_pixels() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();

    let view = refiner.refine(Point::new(100.0, 100.0), &image).unwrap();
    // One magnified pixel right of centre (125 + 5) -> one source pixel right.
    assert_eq!(view.resolve(Point::new(130.0, 124.0)), Point::new(101.0, 99.0));

    let view = refiner.refine(Point::new(100.0, 100.0), &image).unwrap();
    assert_eq!(view.resolve(Point::new(0.0, 0.0)), Point::new(75.0, 75.0));
}

#[test]
fn test_marker_click_maps_back_to_raw_point_near_edges() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();
    for raw in [
        Point::new(10.0, 10.0),
        Point::new(190.0, 190.0),
        Point::new(0.0, 199.0),
        Point::new(110.0, 10.0),
    ] {
        let view = refiner.refine(raw, &image).unwrap();
        let marker = view.marker_position();
        assert_eq!(view.resolve(marker), raw, "raw = {raw:?}");
    }
}

#[test]
fn test_resolve_clamps_outside_clicks() {
    let image = common::coordinate_image(200, 200);
    let refiner = Refiner::default();

    let view = refiner.refine(Point::new(5.0, 5.0), &image).unwrap();
    assert_eq!(view.resolve(Point::new(-40.0, -3.0)), Point::new(0.0, 0.0));

    let view = refiner.refine(Point::new(195.0, 195.0), &image).unwrap();
    assert_eq!(view.resolve(Point::new(900.0, 900.0)), Point::new(199.0, 199.0));
}

#[test]
fn test_custom_magnification() {
    let image = common::coordinate_image(64, 64);
    let refiner = Refiner::new(8, 3).unwrap();
    let view = refiner.refine(Point::new(32.0, 32.0), &image).unwrap();
    assert_eq!(view.size(), 24);
    assert_eq!(view.window(), PixelRect { x: 28, y: 28, width: 8, height: 8 });
    assert_eq!(view.resolve(Point::new(12.0, 12.0)), Point::new(32.0, 32.0));
}

// ---------------------------------------------------------------------------
// Safe zone
// ---------------------------------------------------------------------------

#[test]
fn test_safe_zone_inset_by_half_crop() {
    let zone = safe_zone(200, 120, 50).unwrap();
    assert_eq!(
        zone,
        PixelRect {
            x: 25,
            y: 25,
            width: 150,
            height: 70
        }
    );
    assert!(safe_zone(49, 120, 50).is_none());
}

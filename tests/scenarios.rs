use gallery_viewer::model::{
    Axis, HapticPulse, ItemNavigation, NavigationIntent, Point, ViewTransform,
};
use gallery_viewer::{GestureConfig, GestureEngine};

const WIDTH: f64 = 400.0;

fn engine(count: usize, index: usize) -> GestureEngine {
    let mut e = GestureEngine::new(GestureConfig::default(), count, index);
    e.set_viewport(WIDTH, 800.0);
    e
}

fn with_next_item(mut e: GestureEngine) -> GestureEngine {
    e.set_item_navigation(ItemNavigation {
        has_next_item: true,
        has_prev_item: false,
    });
    e
}

/// Two-finger pinch starting `start` apart and ending `end` apart.
fn pinch(e: &mut GestureEngine, start: f64, end: f64) {
    e.pointer_down(1, Point::new(100.0, 400.0));
    e.pointer_down(2, Point::new(100.0 + start, 400.0));
    e.pointer_move(2, Point::new(100.0 + end, 400.0));
}

#[test]
fn swipe_past_threshold_commits_next_image() {
    let mut e = engine(3, 1);
    e.pointer_down(1, Point::new(300.0, 400.0));
    e.pointer_move(1, Point::new(250.0, 400.0));
    e.pointer_move(1, Point::new(300.0 - 0.3 * WIDTH, 400.0));
    let out = e.pointer_up(1, 0.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::NextImage);
    assert_eq!(out.haptic, Some(HapticPulse::Success));
    assert_eq!(out.preload, vec![2, 1]);
    assert_eq!(e.position().current_index, 2);
    assert_eq!(e.transform(), ViewTransform::REST);
}

#[test]
fn swipe_past_first_image_rubber_bands() {
    let mut e = engine(3, 0);
    e.pointer_down(1, Point::new(100.0, 400.0));
    e.pointer_move(1, Point::new(120.0, 400.0));
    e.pointer_move(1, Point::new(100.0 + 0.5 * WIDTH, 400.0));
    // 200 units of finger travel, every unit damped
    assert!((e.transform().swipe_offset - 60.0).abs() < 1e-9);

    let out = e.pointer_up(1, 1000.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::None);
    assert_eq!(out.haptic, Some(HapticPulse::Blocked));
    assert_eq!(e.position().current_index, 0);
    assert_eq!(e.transform(), ViewTransform::REST);
    assert!((e.displayed(1000.0).swipe_offset - 60.0).abs() < 1e-9);
    assert!(e.displayed(1100.0).swipe_offset < 60.0);
    assert_eq!(e.displayed(2000.0).swipe_offset, 0.0);
    assert!(!e.is_animating(2000.0));
}

#[test]
fn pinch_scales_by_distance_ratio() {
    let mut e = engine(3, 1);
    pinch(&mut e, 100.0, 250.0);
    assert_eq!(e.transform().scale, 2.5);
}

#[test]
fn pinch_scale_is_clamped_to_max() {
    let mut e = engine(3, 1);
    pinch(&mut e, 100.0, 700.0);
    assert_eq!(e.transform().scale, 5.0);
}

#[test]
fn zoomed_drag_pans_without_swiping() {
    let mut e = engine(3, 1);
    pinch(&mut e, 100.0, 200.0);
    e.pointer_up(2, 0.0);
    assert_eq!(e.pointer_up(1, 0.0).unwrap().intent, NavigationIntent::None);
    assert_eq!(e.transform().scale, 2.0);

    e.pointer_down(1, Point::new(200.0, 400.0));
    e.pointer_move(1, Point::new(240.0, 385.0));
    let t = e.transform();
    assert_eq!(t.pan, Point::new(40.0, -15.0));
    assert_eq!(t.swipe_offset, 0.0);
    e.pointer_up(1, 500.0);
    assert_eq!(e.position().current_index, 1);
}

#[test]
fn vertical_swipe_requests_next_item_once() {
    let mut e = with_next_item(engine(3, 1));
    e.pointer_down(7, Point::new(200.0, 300.0));
    e.pointer_move(7, Point::new(202.0, 340.0));
    e.pointer_move(7, Point::new(205.0, 370.0));
    let out = e.pointer_up(7, 0.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::NextItem);
    assert_eq!(out.haptic, Some(HapticPulse::Success));
    assert_eq!(e.position().current_index, 1);
    assert_eq!(e.pointer_up(7, 10.0), None);
}

#[test]
fn vertical_swipe_without_callback_is_blocked() {
    let mut e = engine(3, 1);
    e.pointer_down(1, Point::new(200.0, 300.0));
    e.pointer_move(1, Point::new(200.0, 380.0));
    let out = e.pointer_up(1, 0.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::None);
    assert_eq!(out.haptic, Some(HapticPulse::Blocked));
}

#[test]
fn scale_stays_in_bounds_for_any_pinch_sequence() {
    let mut e = engine(3, 1);
    e.pointer_down(1, Point::new(0.0, 0.0));
    e.pointer_down(2, Point::new(100.0, 0.0));
    for d in [150.0, 900.0, 3.0, 0.0, 420.0, 60.0, 1e6, 99.0, 101.0] {
        e.pointer_move(2, Point::new(d, 0.0));
        let t = e.transform();
        assert!((1.0..=5.0).contains(&t.scale), "scale {} out of range", t.scale);
        if t.scale == 1.0 {
            assert_eq!(t, ViewTransform::REST);
        }
    }
}

#[test]
fn returning_to_scale_one_clears_pan() {
    let mut e = engine(3, 1);
    pinch(&mut e, 100.0, 300.0);
    // lift one finger and pan with the other
    e.pointer_up(2, 0.0);
    e.pointer_move(1, Point::new(160.0, 450.0));
    assert_eq!(e.transform().pan, Point::new(60.0, 50.0));
    // second finger back down and pinch all the way in
    e.pointer_down(2, Point::new(460.0, 450.0));
    e.pointer_move(2, Point::new(170.0, 450.0));
    assert_eq!(e.transform(), ViewTransform::REST);
}

#[test]
fn axis_lock_is_exclusive_for_the_session() {
    let mut e = with_next_item(engine(3, 1));
    e.pointer_down(1, Point::new(200.0, 300.0));
    e.pointer_move(1, Point::new(185.0, 302.0));
    e.pointer_move(1, Point::new(180.0, 600.0));
    assert_eq!(e.session().unwrap().axis_lock(), Some(Axis::Horizontal));
    assert_eq!(e.transform().swipe_offset, -20.0);
    let out = e.pointer_up(1, 0.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::None);
}

#[test]
fn offset_exactly_at_threshold_does_not_commit() {
    let threshold = 0.25 * WIDTH;

    let mut e = engine(3, 1);
    e.pointer_down(1, Point::new(300.0, 400.0));
    e.pointer_move(1, Point::new(300.0 - threshold, 400.0));
    assert_eq!(e.pointer_up(1, 0.0).unwrap().intent, NavigationIntent::None);
    assert_eq!(e.position().current_index, 1);

    let mut e = engine(3, 1);
    e.pointer_down(1, Point::new(300.0, 400.0));
    e.pointer_move(1, Point::new(300.0 - threshold - 1.0, 400.0));
    assert_eq!(
        e.pointer_up(1, 0.0).unwrap().intent,
        NavigationIntent::NextImage
    );
    assert_eq!(e.position().current_index, 2);
}

#[test]
fn edge_resistance_applies_to_every_step() {
    let mut e = engine(3, 0);
    e.pointer_down(1, Point::new(0.0, 400.0));
    e.pointer_move(1, Point::new(20.0, 400.0));
    let mut offset = e.transform().swipe_offset;
    assert!((offset - 6.0).abs() < 1e-9);
    for step in 1..=30 {
        e.pointer_move(1, Point::new(20.0 + 10.0 * step as f64, 400.0));
        let next = e.transform().swipe_offset;
        assert!((next - offset - 3.0).abs() < 1e-9);
        offset = next;
    }
}

#[test]
fn drag_out_and_back_at_first_image_stays_put() {
    let mut e = engine(3, 0);
    e.pointer_down(1, Point::new(50.0, 400.0));
    e.pointer_move(1, Point::new(350.0, 400.0));
    assert!((e.transform().swipe_offset - 90.0).abs() < 1e-9);
    e.pointer_move(1, Point::new(50.0, 400.0));
    assert!(e.transform().swipe_offset.abs() < 1e-9);
    let out = e.pointer_up(1, 0.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::None);
    assert_eq!(e.position().current_index, 0);
}

#[test]
fn drag_out_and_back_at_last_image_stays_put() {
    let mut e = engine(3, 2);
    e.pointer_down(1, Point::new(350.0, 400.0));
    e.pointer_move(1, Point::new(50.0, 400.0));
    assert!((e.transform().swipe_offset + 90.0).abs() < 1e-9);
    e.pointer_move(1, Point::new(350.0, 400.0));
    assert!(e.transform().swipe_offset.abs() < 1e-9);
    let out = e.pointer_up(1, 0.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::None);
    assert_eq!(e.position().current_index, 2);
}

#[test]
fn outward_drag_at_first_image_is_damped_from_a_negative_offset() {
    let mut e = engine(3, 0);
    e.pointer_down(1, Point::new(200.0, 400.0));
    e.pointer_move(1, Point::new(150.0, 400.0));
    assert_eq!(e.transform().swipe_offset, -50.0);
    e.pointer_move(1, Point::new(160.0, 400.0));
    assert!((e.transform().swipe_offset + 47.0).abs() < 1e-9);
}

#[test]
fn inward_drag_at_last_image_is_damped_from_a_positive_offset() {
    let mut e = engine(3, 2);
    e.pointer_down(1, Point::new(200.0, 400.0));
    e.pointer_move(1, Point::new(250.0, 400.0));
    assert_eq!(e.transform().swipe_offset, 50.0);
    e.pointer_move(1, Point::new(240.0, 400.0));
    assert!((e.transform().swipe_offset - 47.0).abs() < 1e-9);
}

#[test]
fn cancelled_session_does_not_linger() {
    let mut e = engine(3, 1);
    e.pointer_down(1, Point::new(300.0, 400.0));
    e.pointer_move(1, Point::new(150.0, 400.0));
    let out = e.pointer_cancel(1, 0.0).unwrap();
    assert_eq!(out.intent, NavigationIntent::NextImage);
    assert!(!e.is_gesturing());
}

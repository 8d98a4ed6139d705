//! Gesture classifier.
//!
//! Turns the active pointer positions into a typed delta. Two points are always a
//! pinch; one point pans while zoomed and swipes at rest. Swipes lock to an axis
//! lazily, once the drag has travelled far enough from the first contact.

use crate::config::GestureConfig;
use crate::model::{Axis, CollectionPosition, GestureDelta, Point, ViewTransform};

use super::session::{GestureSession, SessionMode};

pub fn classify(
    cfg: &GestureConfig,
    transform: &ViewTransform,
    session: &mut GestureSession,
    points: &[Point],
    position: &CollectionPosition,
) -> Option<GestureDelta> {
    match points {
        [] => None,
        [a, b] => {
            let distance = a.distance(*b);
            if session.mode != SessionMode::Pinch {
                session.begin_pinch(distance, transform.scale, cfg.pinch_epsilon);
            }
            let ratio = distance.max(cfg.pinch_epsilon) / session.pinch_origin_distance;
            Some(GestureDelta::Pinch {
                scale: cfg.clamp_scale(session.pinch_origin_scale * ratio),
            })
        }
        [point] => {
            let point = *point;
            if transform.is_zoomed() {
                if session.mode == SessionMode::Swipe {
                    // Zoom changed under a running swipe (e.g. wheel); start panning from here.
                    session.last = point;
                }
                session.mode = SessionMode::Pan;
                let (dx, dy) = session.last.delta_to(point);
                session.last = point;
                return Some(GestureDelta::Pan { dx, dy });
            }
            match session.mode {
                SessionMode::Pending | SessionMode::Swipe => {
                    swipe(cfg, transform, session, point, position)
                }
                SessionMode::Pinch | SessionMode::Pan | SessionMode::Inert => {
                    session.last = point;
                    None
                }
            }
        }
        // Only the first two contacts count; the engine never passes more.
        _ => None,
    }
}

fn swipe(
    cfg: &GestureConfig,
    transform: &ViewTransform,
    session: &mut GestureSession,
    point: Point,
    position: &CollectionPosition,
) -> Option<GestureDelta> {
    let mut just_locked = false;
    if session.axis_lock().is_none() {
        let (tx, ty) = session.origin.delta_to(point);
        let axis = lock_candidate(cfg, tx, ty)?;
        session.last = point;
        if !session.lock_axis(axis) {
            return None;
        }
        log::debug!("swipe locked {:?} at ({:.1}, {:.1})", axis, tx, ty);
        just_locked = true;
    }
    // The locking frame carries everything travelled since first contact.
    let from = if just_locked { session.origin } else { session.last };
    let (dx, dy) = from.delta_to(point);
    session.last = point;
    match session.axis_lock() {
        Some(Axis::Horizontal) => Some(GestureDelta::Swipe {
            dx: resisted_dx(cfg, transform.swipe_offset, dx, position),
            dy: 0.0,
            axis: Axis::Horizontal,
        }),
        Some(Axis::Vertical) => Some(GestureDelta::Swipe {
            dx: 0.0,
            dy,
            axis: Axis::Vertical,
        }),
        None => None,
    }
}

/// Axis to lock for a drag of `(tx, ty)` from the origin, if either has dominated
/// past the lock distance.
pub fn lock_candidate(cfg: &GestureConfig, tx: f64, ty: f64) -> Option<Axis> {
    let (ax, ay) = (tx.abs(), ty.abs());
    if ax > cfg.axis_lock_distance && ax > ay {
        Some(Axis::Horizontal)
    } else if ay > cfg.axis_lock_distance && ay > ax {
        Some(Axis::Vertical)
    } else {
        None
    }
}

/// Damps drags past the first or last image.
///
/// Every push outward is scaled by `edge_resistance`. A drag back toward the
/// content is scaled while the offset is still beyond the edge, and moves freely
/// once it crosses zero, so returning to the first contact returns the offset to 0.
pub fn resisted_dx(
    cfg: &GestureConfig,
    swipe_offset: f64,
    dx: f64,
    position: &CollectionPosition,
) -> f64 {
    let k = cfg.edge_resistance;
    if dx > 0.0 {
        if !position.has_prev {
            return dx * k;
        }
        if !position.has_next && swipe_offset < 0.0 {
            return back_through_edge(-swipe_offset, dx, k);
        }
    } else if dx < 0.0 {
        if !position.has_next {
            return dx * k;
        }
        if !position.has_prev && swipe_offset > 0.0 {
            return -back_through_edge(swipe_offset, -dx, k);
        }
    }
    dx
}

/// Magnitude of a return drag of `travel` from `beyond` past the edge: damped up
/// to the edge, free after it.
fn back_through_edge(beyond: f64, travel: f64, k: f64) -> f64 {
    if travel * k <= beyond {
        return travel * k;
    }
    beyond + (travel - beyond / k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GestureConfig {
        GestureConfig::default()
    }

    fn middle() -> CollectionPosition {
        CollectionPosition::new(1, 3)
    }

    fn drag(session: &mut GestureSession, t: &ViewTransform, to: Point) -> Option<GestureDelta> {
        classify(&cfg(), t, session, &[to], &middle())
    }

    #[test]
    fn pinch_ratio_scales_origin() {
        let mut s = GestureSession::new(Point::ZERO);
        s.begin_pinch(100.0, 1.0, 1e-3);
        let d = classify(
            &cfg(),
            &ViewTransform::REST,
            &mut s,
            &[Point::new(0.0, 0.0), Point::new(250.0, 0.0)],
            &middle(),
        );
        assert_eq!(d, Some(GestureDelta::Pinch { scale: 2.5 }));
    }

    #[test]
    fn pinch_candidate_is_clamped() {
        let mut s = GestureSession::new(Point::ZERO);
        s.begin_pinch(100.0, 1.0, 1e-3);
        let d = classify(
            &cfg(),
            &ViewTransform::REST,
            &mut s,
            &[Point::new(0.0, 0.0), Point::new(0.0, 700.0)],
            &middle(),
        );
        assert_eq!(d, Some(GestureDelta::Pinch { scale: 5.0 }));
    }

    #[test]
    fn coincident_points_do_not_divide_by_zero() {
        let mut s = GestureSession::new(Point::ZERO);
        let p = Point::new(40.0, 40.0);
        let d = classify(&cfg(), &ViewTransform::REST, &mut s, &[p, p], &middle());
        assert_eq!(d, Some(GestureDelta::Pinch { scale: 1.0 }));
        let d = classify(
            &cfg(),
            &ViewTransform::REST,
            &mut s,
            &[p, Point::new(40.0, 140.0)],
            &middle(),
        );
        assert_eq!(d, Some(GestureDelta::Pinch { scale: 5.0 }));
    }

    #[test]
    fn pinch_overrides_axis_lock() {
        let mut s = GestureSession::new(Point::ZERO);
        drag(&mut s, &ViewTransform::REST, Point::new(30.0, 0.0));
        assert_eq!(s.axis_lock(), Some(Axis::Horizontal));
        let d = classify(
            &cfg(),
            &ViewTransform::REST,
            &mut s,
            &[Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            &middle(),
        );
        assert!(matches!(d, Some(GestureDelta::Pinch { .. })));
        assert_eq!(s.mode, SessionMode::Pinch);
    }

    #[test]
    fn single_point_pans_when_zoomed() {
        let zoomed = ViewTransform {
            scale: 2.0,
            ..ViewTransform::REST
        };
        let mut s = GestureSession::new(Point::new(100.0, 100.0));
        let d = drag(&mut s, &zoomed, Point::new(140.0, 85.0));
        assert_eq!(d, Some(GestureDelta::Pan { dx: 40.0, dy: -15.0 }));
        assert_eq!(s.axis_lock(), None);
    }

    #[test]
    fn small_drag_stays_unlocked() {
        let mut s = GestureSession::new(Point::ZERO);
        assert_eq!(drag(&mut s, &ViewTransform::REST, Point::new(8.0, 3.0)), None);
        assert_eq!(drag(&mut s, &ViewTransform::REST, Point::new(10.0, 0.0)), None);
        assert_eq!(s.axis_lock(), None);
    }

    #[test]
    fn locking_frame_carries_full_travel() {
        let mut s = GestureSession::new(Point::ZERO);
        drag(&mut s, &ViewTransform::REST, Point::new(-6.0, 1.0));
        let d = drag(&mut s, &ViewTransform::REST, Point::new(-14.0, 2.0));
        assert_eq!(
            d,
            Some(GestureDelta::Swipe {
                dx: -14.0,
                dy: 0.0,
                axis: Axis::Horizontal
            })
        );
        let d = drag(&mut s, &ViewTransform::REST, Point::new(-20.0, 30.0));
        assert_eq!(
            d,
            Some(GestureDelta::Swipe {
                dx: -6.0,
                dy: 0.0,
                axis: Axis::Horizontal
            })
        );
    }

    #[test]
    fn vertical_lock_ignores_horizontal_motion() {
        let mut s = GestureSession::new(Point::ZERO);
        let d = drag(&mut s, &ViewTransform::REST, Point::new(3.0, 12.0));
        assert_eq!(
            d,
            Some(GestureDelta::Swipe {
                dx: 0.0,
                dy: 12.0,
                axis: Axis::Vertical
            })
        );
        drag(&mut s, &ViewTransform::REST, Point::new(200.0, 20.0));
        assert_eq!(s.axis_lock(), Some(Axis::Vertical));
        assert_eq!(s.vertical_travel(), 20.0);
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn resistance_at_first_image_regardless_of_offset() {
        let first = CollectionPosition::new(0, 3);
        let cfg = cfg();
        for offset in [-400.0, -50.0, 0.0, 1.0, 50.0, 400.0] {
            assert!(approx(resisted_dx(&cfg, offset, 10.0, &first), 3.0));
        }
        // back toward the content, still beyond the edge
        assert!(approx(resisted_dx(&cfg, 50.0, -10.0, &first), -3.0));
        // toward the next image from inside the strip
        assert_eq!(resisted_dx(&cfg, 0.0, -10.0, &first), -10.0);
        assert_eq!(resisted_dx(&cfg, -50.0, -10.0, &first), -10.0);
    }

    #[test]
    fn resistance_at_last_image() {
        let last = CollectionPosition::new(2, 3);
        let cfg = cfg();
        for offset in [-400.0, -20.0, 0.0, 50.0] {
            assert!(approx(resisted_dx(&cfg, offset, -10.0, &last), -3.0));
        }
        assert!(approx(resisted_dx(&cfg, -20.0, 10.0, &last), 3.0));
        assert_eq!(resisted_dx(&cfg, 0.0, 10.0, &last), 10.0);
    }

    #[test]
    fn return_drag_is_free_once_past_the_edge() {
        let first = CollectionPosition::new(0, 3);
        // 6 units beyond the edge take 20 finger units to undo; the other 80 are free
        assert!(approx(resisted_dx(&cfg(), 6.0, -100.0, &first), -86.0));
        let last = CollectionPosition::new(2, 3);
        assert!(approx(resisted_dx(&cfg(), -6.0, 100.0, &last), 86.0));
    }

    #[test]
    fn single_image_damps_both_ways() {
        let only = CollectionPosition::new(0, 1);
        assert!(approx(resisted_dx(&cfg(), 30.0, -10.0, &only), -3.0));
        assert!(approx(resisted_dx(&cfg(), -30.0, 10.0, &only), 3.0));
    }

    #[test]
    fn extra_contacts_yield_nothing() {
        let mut s = GestureSession::new(Point::ZERO);
        let pts = [Point::ZERO, Point::new(100.0, 0.0), Point::new(50.0, 80.0)];
        assert_eq!(
            classify(&cfg(), &ViewTransform::REST, &mut s, &pts, &middle()),
            None
        );
        assert_eq!(s.mode, SessionMode::Pending);
    }

    #[test]
    fn inert_session_yields_nothing() {
        let mut s = GestureSession::new(Point::ZERO);
        s.begin_pinch(100.0, 1.0, 1e-3);
        s.rebase(Point::ZERO, false);
        assert_eq!(drag(&mut s, &ViewTransform::REST, Point::new(80.0, 0.0)), None);
        assert_eq!(s.axis_lock(), None);
    }
}

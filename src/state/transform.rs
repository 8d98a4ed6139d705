//! Transform accumulator: folds classified deltas into the view transform.
//!
//! All functions are pure. Any path that lands on the minimum scale returns
//! [`ViewTransform::REST`], so pan and swipe offset can never linger at rest.

use crate::config::GestureConfig;
use crate::model::{Axis, GestureDelta, Point, ViewTransform};

pub fn apply(cfg: &GestureConfig, transform: ViewTransform, delta: GestureDelta) -> ViewTransform {
    match delta {
        GestureDelta::Pinch { scale } => with_scale(cfg, transform, scale),
        GestureDelta::Pan { dx, dy } => {
            if !transform.is_zoomed() {
                return transform;
            }
            ViewTransform {
                pan: Point::new(transform.pan.x + dx, transform.pan.y + dy),
                ..transform
            }
        }
        GestureDelta::Swipe {
            dx,
            axis: Axis::Horizontal,
            ..
        } => {
            if !transform.is_at_rest() {
                return transform;
            }
            ViewTransform {
                swipe_offset: transform.swipe_offset + dx,
                ..transform
            }
        }
        // Vertical travel is read from the session at release; nothing moves on screen.
        GestureDelta::Swipe {
            axis: Axis::Vertical,
            ..
        } => transform,
    }
}

/// Replaces the scale, keeping pan. Swipe offset only exists at rest.
pub fn with_scale(cfg: &GestureConfig, transform: ViewTransform, scale: f64) -> ViewTransform {
    let scale = cfg.clamp_scale(scale);
    if scale <= cfg.min_scale {
        return ViewTransform::REST;
    }
    ViewTransform {
        scale,
        pan: transform.pan,
        swipe_offset: 0.0,
    }
}

/// Zooms so the content under `anchor` stays put. `anchor` is relative to the
/// viewport centre, which is also the transform origin.
pub fn zoom_about(
    cfg: &GestureConfig,
    transform: ViewTransform,
    scale: f64,
    anchor: Point,
) -> ViewTransform {
    let target = cfg.clamp_scale(scale);
    if target <= cfg.min_scale {
        return ViewTransform::REST;
    }
    let content_x = (anchor.x - transform.pan.x) / transform.scale;
    let content_y = (anchor.y - transform.pan.y) / transform.scale;
    ViewTransform {
        scale: target,
        pan: Point::new(anchor.x - content_x * target, anchor.y - content_y * target),
        swipe_offset: 0.0,
    }
}

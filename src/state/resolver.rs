//! Navigation resolver: the single commit/cancel decision made when a gesture ends.

use crate::config::GestureConfig;
use crate::model::{
    Axis, CollectionPosition, HapticPulse, ItemNavigation, NavigationIntent, ViewTransform,
};

use super::session::GestureSession;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub intent: NavigationIntent,
    /// Transform to settle toward. Irrelevant for image commits, which reset the view.
    pub settle: ViewTransform,
    pub haptic: Option<HapticPulse>,
}

impl Resolution {
    fn stay(settle: ViewTransform) -> Self {
        Self {
            intent: NavigationIntent::None,
            settle,
            haptic: None,
        }
    }

    fn commit(intent: NavigationIntent) -> Self {
        Self {
            intent,
            settle: ViewTransform::REST,
            haptic: Some(HapticPulse::Success),
        }
    }

    fn blocked(settle: ViewTransform) -> Self {
        Self {
            intent: NavigationIntent::None,
            settle,
            haptic: Some(HapticPulse::Blocked),
        }
    }
}

pub fn resolve(
    cfg: &GestureConfig,
    session: &GestureSession,
    transform: &ViewTransform,
    position: &CollectionPosition,
    items: ItemNavigation,
    viewport_width: f64,
) -> Resolution {
    if !transform.is_at_rest() {
        if transform.scale < cfg.snap_to_rest_below {
            return Resolution::stay(ViewTransform::REST);
        }
        return Resolution::stay(*transform);
    }
    let rubber_band = ViewTransform {
        swipe_offset: 0.0,
        ..*transform
    };
    match session.axis_lock() {
        Some(Axis::Horizontal) => {
            let threshold = cfg.horizontal_threshold(viewport_width);
            let offset = transform.swipe_offset;
            if offset < -threshold && position.has_next {
                return Resolution::commit(NavigationIntent::NextImage);
            }
            if offset > threshold && position.has_prev {
                return Resolution::commit(NavigationIntent::PrevImage);
            }
            // Blocked: the finger went far enough to commit, but there is nothing that way.
            let travel = session.horizontal_travel();
            let pushed_past_edge = (travel > threshold && !position.has_prev)
                || (travel < -threshold && !position.has_next);
            if pushed_past_edge {
                Resolution::blocked(rubber_band)
            } else {
                Resolution::stay(rubber_band)
            }
        }
        Some(Axis::Vertical) => {
            let threshold = cfg.vertical_commit_distance;
            let travel = session.vertical_travel();
            if travel > threshold {
                if items.has_next_item {
                    return Resolution::commit(NavigationIntent::NextItem);
                }
                return Resolution::blocked(rubber_band);
            }
            if travel < -threshold {
                if items.has_prev_item {
                    return Resolution::commit(NavigationIntent::PrevItem);
                }
                return Resolution::blocked(rubber_band);
            }
            Resolution::stay(rubber_band)
        }
        None => Resolution::stay(rubber_band),
    }
}

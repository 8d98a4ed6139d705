// Per-gesture pointer tracking. Lives from the first pointer-down to the last pointer-up.
use crate::model::{Axis, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// One point down, not yet classified.
    Pending,
    Pinch,
    Pan,
    Swipe,
    /// A pinch ended at rest with one finger still down; further motion is ignored.
    Inert,
}

#[derive(Clone, Debug)]
pub struct GestureSession {
    pub origin: Point,
    pub last: Point,
    pub pinch_origin_distance: f64,
    pub pinch_origin_scale: f64,
    pub mode: SessionMode,
    /// Set once any pinch happened during this session; such a session never swipes.
    pub pinched: bool,
    axis_lock: Option<Axis>,
}

impl GestureSession {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            last: origin,
            pinch_origin_distance: 0.0,
            pinch_origin_scale: 1.0,
            mode: SessionMode::Pending,
            pinched: false,
            axis_lock: None,
        }
    }

    pub fn axis_lock(&self) -> Option<Axis> {
        self.axis_lock
    }

    /// Locks the swipe axis. Returns false if the session was already locked.
    pub fn lock_axis(&mut self, axis: Axis) -> bool {
        if self.axis_lock.is_some() {
            return false;
        }
        self.axis_lock = Some(axis);
        self.mode = SessionMode::Swipe;
        true
    }

    pub fn begin_pinch(&mut self, distance: f64, scale: f64, epsilon: f64) {
        self.pinch_origin_distance = distance.max(epsilon);
        self.pinch_origin_scale = scale;
        self.mode = SessionMode::Pinch;
        self.pinched = true;
    }

    /// Restarts single-point tracking after one finger of a pinch lifts.
    pub fn rebase(&mut self, point: Point, zoomed: bool) {
        self.origin = point;
        self.last = point;
        self.mode = if zoomed {
            SessionMode::Pan
        } else {
            SessionMode::Inert
        };
    }

    /// Net vertical displacement since first contact, positive downward.
    pub fn vertical_travel(&self) -> f64 {
        self.last.y - self.origin.y
    }

    pub fn horizontal_travel(&self) -> f64 {
        self.last.x - self.origin.x
    }

    /// True when the session never left its origin by more than `slop`.
    pub fn is_tap(&self, slop: f64) -> bool {
        !self.pinched && self.axis_lock.is_none() && self.origin.distance(self.last) <= slop
    }
}

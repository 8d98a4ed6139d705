// Eased settle between a released transform and the resolver's target.
use crate::model::{Point, ViewTransform};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleAnimation {
    pub from: ViewTransform,
    pub to: ViewTransform,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl SettleAnimation {
    pub fn new(from: ViewTransform, to: ViewTransform, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    pub fn sample(&self, now_ms: f64) -> ViewTransform {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        let e = ease_out_cubic(t);
        let lerp = |a: f64, b: f64| a + (b - a) * e;
        ViewTransform {
            scale: lerp(self.from.scale, self.to.scale),
            pan: Point::new(
                lerp(self.from.pan.x, self.to.pan.x),
                lerp(self.from.pan.y, self.to.pan.y),
            ),
            swipe_offset: lerp(self.from.swipe_offset, self.to.swipe_offset),
        }
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

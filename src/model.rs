//! Core data types for the gallery viewer.
//! Everything here is plain data: the engine in `state` owns and mutates it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Displacement from `self` to `other`.
    pub fn delta_to(self, other: Point) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }
}

/// Scale and translation of the displayed image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    /// Translation while zoomed in. Zero whenever `scale == 1.0`.
    pub pan: Point,
    /// Horizontal drag of the image strip. Zero whenever `scale != 1.0`.
    pub swipe_offset: f64,
}

impl ViewTransform {
    pub const REST: ViewTransform = ViewTransform {
        scale: 1.0,
        pan: Point::ZERO,
        swipe_offset: 0.0,
    };

    pub fn is_at_rest(&self) -> bool {
        self.scale == 1.0
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    /// CSS transform for the active image. The swipe offset is rendered on the strip, not here.
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0) scale({:.4})",
            self.pan.x, self.pan.y, self.scale
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::REST
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Image to image.
    Horizontal,
    /// Item to item in the parent collection.
    Vertical,
}

/// Output of the classifier for a single move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureDelta {
    /// Clamped candidate scale for the current pinch frame.
    Pinch { scale: f64 },
    Pan { dx: f64, dy: f64 },
    /// `dx` is already resistance-scaled for horizontal swipes.
    Swipe { dx: f64, dy: f64, axis: Axis },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPosition {
    pub current_index: usize,
    pub item_count: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl CollectionPosition {
    /// Derives the position for `item_count` images, clamping `index` into range.
    pub fn new(index: usize, item_count: usize) -> Self {
        let current_index = if item_count == 0 {
            0
        } else {
            index.min(item_count - 1)
        };
        Self {
            current_index,
            item_count,
            has_next: current_index + 1 < item_count,
            has_prev: current_index > 0,
        }
    }

    /// Indices adjacent to the current one that exist.
    pub fn neighbors(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(2);
        if self.has_prev {
            out.push(self.current_index - 1);
        }
        if self.has_next {
            out.push(self.current_index + 1);
        }
        out
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationIntent {
    #[default]
    None,
    NextImage,
    PrevImage,
    NextItem,
    PrevItem,
}

impl NavigationIntent {
    pub fn is_commit(self) -> bool {
        self != NavigationIntent::None
    }
}

/// Which collection-level callbacks the host supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemNavigation {
    pub has_next_item: bool,
    pub has_prev_item: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticPulse {
    /// Committed navigation.
    Success,
    /// Gesture pushed against a missing neighbour.
    Blocked,
}

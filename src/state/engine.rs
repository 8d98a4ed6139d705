//! Gesture engine: owns the view transform, the live gesture session and the
//! collection position, and wires classifier → accumulator → resolver.
//!
//! The engine performs no I/O. Side effects it wants (haptic pulse, neighbour
//! preload, item callbacks) are returned as a [`NavigationOutcome`] for the shell
//! to carry out.

use crate::config::GestureConfig;
use crate::model::{
    CollectionPosition, HapticPulse, ItemNavigation, NavigationIntent, Point, ViewTransform,
};

use super::animation::SettleAnimation;
use super::classifier::classify;
use super::resolver::resolve;
use super::session::GestureSession;
use super::transform;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationOutcome {
    pub intent: NavigationIntent,
    pub haptic: Option<HapticPulse>,
    /// Image indices to fetch ahead of time. Non-empty only when the index changed.
    pub preload: Vec<usize>,
}

#[derive(Clone, Copy, Debug)]
struct Tap {
    at_ms: f64,
    point: Point,
}

#[derive(Clone, Debug)]
pub struct GestureEngine {
    config: GestureConfig,
    transform: ViewTransform,
    session: Option<GestureSession>,
    /// Active pointers in contact order.
    pointers: Vec<(i32, Point)>,
    position: CollectionPosition,
    items: ItemNavigation,
    viewport: (f64, f64),
    animation: Option<SettleAnimation>,
    last_tap: Option<Tap>,
}

impl GestureEngine {
    pub fn new(config: GestureConfig, item_count: usize, initial_index: usize) -> Self {
        let position = CollectionPosition::new(initial_index, item_count);
        if position.current_index != initial_index {
            log::warn!(
                "initial index {} out of range for {} images, using {}",
                initial_index,
                item_count,
                position.current_index
            );
        }
        Self {
            config,
            transform: ViewTransform::REST,
            session: None,
            pointers: Vec::with_capacity(2),
            position,
            items: ItemNavigation::default(),
            viewport: (0.0, 0.0),
            animation: None,
            last_tap: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn position(&self) -> CollectionPosition {
        self.position
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_gesturing(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width.max(0.0), height.max(0.0));
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport.0
    }

    pub fn set_item_navigation(&mut self, items: ItemNavigation) {
        self.items = items;
    }

    /// Transform to render at `now_ms`, following any settle animation.
    pub fn displayed(&mut self, now_ms: f64) -> ViewTransform {
        match self.animation {
            Some(anim) if !anim.is_finished(now_ms) => anim.sample(now_ms),
            Some(_) => {
                self.animation = None;
                self.transform
            }
            None => self.transform,
        }
    }

    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.animation
            .map(|anim| !anim.is_finished(now_ms))
            .unwrap_or(false)
    }

    /// Direct navigation. Clamps, resets the view and reports neighbours to preload.
    pub fn go_to(&mut self, index: usize) -> Vec<usize> {
        let position = CollectionPosition::new(index, self.position.item_count);
        if position.current_index != index {
            log::warn!("index {} clamped to {}", index, position.current_index);
        }
        self.position = position;
        self.reset_view();
        self.preload_list()
    }

    /// The image list changed; keep the index where possible.
    pub fn set_item_count(&mut self, item_count: usize) -> Vec<usize> {
        self.position = CollectionPosition::new(self.position.current_index, item_count);
        self.reset_view();
        self.preload_list()
    }

    fn reset_view(&mut self) {
        self.transform = ViewTransform::REST;
        self.session = None;
        self.pointers.clear();
        self.animation = None;
        self.last_tap = None;
    }

    fn preload_list(&self) -> Vec<usize> {
        if self.position.item_count == 0 {
            return Vec::new();
        }
        let mut out = vec![self.position.current_index];
        out.extend(self.position.neighbors());
        out
    }

    pub fn pointer_down(&mut self, id: i32, point: Point) {
        if self.animation.take().is_some() {
            log::debug!("settle interrupted by pointer {}", id);
        }
        match self.pointers.iter_mut().find(|(pid, _)| *pid == id) {
            Some(entry) => entry.1 = point,
            None => self.pointers.push((id, point)),
        }
        let session = self.session.get_or_insert_with(|| {
            log::debug!("gesture session start at ({:.1}, {:.1})", point.x, point.y);
            GestureSession::new(point)
        });
        if self.pointers.len() == 2 {
            let distance = self.pointers[0].1.distance(self.pointers[1].1);
            session.begin_pinch(distance, self.transform.scale, self.config.pinch_epsilon);
        }
    }

    pub fn pointer_move(&mut self, id: i32, point: Point) -> Option<ViewTransform> {
        let entry = self.pointers.iter_mut().find(|(pid, _)| *pid == id)?;
        entry.1 = point;
        let session = self.session.as_mut()?;
        let points: Vec<Point> = self.pointers.iter().take(2).map(|(_, p)| *p).collect();
        let delta = classify(
            &self.config,
            &self.transform,
            session,
            &points,
            &self.position,
        )?;
        self.transform = transform::apply(&self.config, self.transform, delta);
        Some(self.transform)
    }

    /// Ends contact for `id`. Returns the release outcome once the last pointer lifts.
    pub fn pointer_up(&mut self, id: i32, now_ms: f64) -> Option<NavigationOutcome> {
        let before = self.pointers.len();
        self.pointers.retain(|(pid, _)| *pid != id);
        if self.pointers.len() == before {
            return None;
        }
        match self.pointers.len() {
            0 => Some(self.release(now_ms)),
            1 => {
                let remaining = self.pointers[0].1;
                let zoomed = self.transform.is_zoomed();
                if let Some(session) = self.session.as_mut() {
                    session.rebase(remaining, zoomed);
                }
                None
            }
            _ => {
                // A third finger lifted; restart the pinch from the two that remain.
                let distance = self.pointers[0].1.distance(self.pointers[1].1);
                let scale = self.transform.scale;
                if let Some(session) = self.session.as_mut() {
                    session.begin_pinch(distance, scale, self.config.pinch_epsilon);
                }
                None
            }
        }
    }

    /// Interrupted input resolves exactly like a release with the last known state.
    pub fn pointer_cancel(&mut self, id: i32, now_ms: f64) -> Option<NavigationOutcome> {
        self.pointer_up(id, now_ms)
    }

    fn release(&mut self, now_ms: f64) -> NavigationOutcome {
        let Some(session) = self.session.take() else {
            return NavigationOutcome::default();
        };
        let resolution = resolve(
            &self.config,
            &session,
            &self.transform,
            &self.position,
            self.items,
            self.viewport.0,
        );
        log::debug!(
            "gesture session end: axis={:?} offset={:.1} scale={:.2}",
            session.axis_lock(),
            self.transform.swipe_offset,
            self.transform.scale
        );
        if resolution.intent.is_commit() {
            log::info!(
                "navigation {:?} from index {}",
                resolution.intent,
                self.position.current_index
            );
        }

        if session.is_tap(self.config.double_tap_slop) {
            if let Some(outcome) = self.register_tap(session.last, now_ms) {
                return outcome;
            }
        } else {
            self.last_tap = None;
        }

        let released = self.transform;
        let width = self.viewport.0;
        match resolution.intent {
            NavigationIntent::NextImage | NavigationIntent::PrevImage => {
                let forward = resolution.intent == NavigationIntent::NextImage;
                let target = if forward {
                    self.position.current_index + 1
                } else {
                    self.position.current_index.saturating_sub(1)
                };
                let preload = self.go_to(target);
                // The incoming image continues from where the finger left it.
                let carried = if forward {
                    released.swipe_offset + width
                } else {
                    released.swipe_offset - width
                };
                self.animate(
                    ViewTransform {
                        swipe_offset: carried,
                        ..ViewTransform::REST
                    },
                    now_ms,
                );
                NavigationOutcome {
                    intent: resolution.intent,
                    haptic: resolution.haptic,
                    preload,
                }
            }
            NavigationIntent::NextItem | NavigationIntent::PrevItem => {
                self.transform = ViewTransform::REST;
                NavigationOutcome {
                    intent: resolution.intent,
                    haptic: resolution.haptic,
                    preload: Vec::new(),
                }
            }
            NavigationIntent::None => {
                self.transform = resolution.settle;
                self.animate(released, now_ms);
                NavigationOutcome {
                    intent: NavigationIntent::None,
                    haptic: resolution.haptic,
                    preload: Vec::new(),
                }
            }
        }
    }

    /// Records a tap; a second one close in time and space toggles zoom.
    fn register_tap(&mut self, point: Point, now_ms: f64) -> Option<NavigationOutcome> {
        let previous = self.last_tap.take();
        let is_double = previous
            .map(|tap| {
                now_ms - tap.at_ms <= self.config.double_tap_window_ms
                    && tap.point.distance(point) <= self.config.double_tap_slop
            })
            .unwrap_or(false);
        if !is_double {
            self.last_tap = Some(Tap { at_ms: now_ms, point });
            return None;
        }
        let from = self.transform;
        self.transform = if from.is_zoomed() {
            ViewTransform::REST
        } else {
            transform::zoom_about(
                &self.config,
                from,
                self.config.double_tap_scale,
                self.from_center(point),
            )
        };
        log::debug!("double tap zoom {:.2} -> {:.2}", from.scale, self.transform.scale);
        self.animate(from, now_ms);
        Some(NavigationOutcome::default())
    }

    /// Starts a settle from `from` to the current transform.
    fn animate(&mut self, from: ViewTransform, now_ms: f64) {
        if from == self.transform || self.config.settle_duration_ms <= 0.0 {
            self.animation = None;
            return;
        }
        self.animation = Some(SettleAnimation::new(
            from,
            self.transform,
            now_ms,
            self.config.settle_duration_ms,
        ));
    }

    fn from_center(&self, point: Point) -> Point {
        Point::new(point.x - self.viewport.0 / 2.0, point.y - self.viewport.1 / 2.0)
    }

    /// Wheel zoom anchored at the cursor. Applied immediately, no settle.
    pub fn wheel(&mut self, delta_y: f64, at: Point) {
        if self.is_gesturing() {
            return;
        }
        self.animation = None;
        let factor = (-delta_y * self.config.wheel_zoom_sensitivity).exp();
        self.transform = transform::zoom_about(
            &self.config,
            self.transform,
            self.transform.scale * factor,
            self.from_center(at),
        );
    }

    /// Zoom about the viewport centre with a settle (buttons, keyboard).
    pub fn zoom_by(&mut self, factor: f64, now_ms: f64) {
        if self.is_gesturing() {
            return;
        }
        let from = self.displayed(now_ms);
        self.transform = transform::zoom_about(
            &self.config,
            self.transform,
            self.transform.scale * factor,
            Point::ZERO,
        );
        self.animate(from, now_ms);
    }

    pub fn reset_zoom(&mut self, now_ms: f64) {
        if self.is_gesturing() {
            return;
        }
        let from = self.displayed(now_ms);
        self.transform = ViewTransform::REST;
        self.animate(from, now_ms);
    }

    /// Steps one image (arrow keys and buttons). Blocked at either end, no wrap.
    pub fn step(&mut self, forward: bool) -> NavigationOutcome {
        let available = if forward {
            self.position.has_next
        } else {
            self.position.has_prev
        };
        if !available || self.is_gesturing() {
            return NavigationOutcome {
                intent: NavigationIntent::None,
                haptic: Some(HapticPulse::Blocked),
                preload: Vec::new(),
            };
        }
        let (intent, target) = if forward {
            (NavigationIntent::NextImage, self.position.current_index + 1)
        } else {
            (NavigationIntent::PrevImage, self.position.current_index - 1)
        };
        log::info!("navigation {:?} from index {}", intent, self.position.current_index);
        NavigationOutcome {
            intent,
            haptic: Some(HapticPulse::Success),
            preload: self.go_to(target),
        }
    }

    /// Collection-level navigation outside of a gesture (arrow keys).
    pub fn request_item(&mut self, forward: bool) -> NavigationOutcome {
        let available = if forward {
            self.items.has_next_item
        } else {
            self.items.has_prev_item
        };
        if !available || self.is_gesturing() {
            return NavigationOutcome {
                intent: NavigationIntent::None,
                haptic: Some(HapticPulse::Blocked),
                preload: Vec::new(),
            };
        }
        let intent = if forward {
            NavigationIntent::NextItem
        } else {
            NavigationIntent::PrevItem
        };
        NavigationOutcome {
            intent,
            haptic: Some(HapticPulse::Success),
            preload: Vec::new(),
        }
    }
}

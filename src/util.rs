// Browser-side helpers for the viewer shell.

use crate::config::GestureConfig;
use crate::model::HapticPulse;

pub fn format_counter(index: usize, count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    format!("{} / {}", index + 1, count)
}

pub fn pulse_ms(cfg: &GestureConfig, pulse: HapticPulse) -> u32 {
    match pulse {
        HapticPulse::Success => cfg.success_pulse_ms,
        HapticPulse::Blocked => cfg.blocked_pulse_ms,
    }
}

/// Fires a vibration where the platform supports it. Silently does nothing elsewhere.
pub fn vibrate(cfg: &GestureConfig, pulse: HapticPulse) {
    if let Some(win) = web_sys::window() {
        let _ = win.navigator().vibrate_with_duration(pulse_ms(cfg, pulse));
    }
}

/// Starts fetching images so a following swipe renders without a loading flash.
pub fn preload_images(images: &[impl AsRef<str>], indices: &[usize]) {
    for &i in indices {
        let Some(src) = images.get(i) else {
            continue;
        };
        match web_sys::HtmlImageElement::new() {
            Ok(img) => img.set_src(src.as_ref()),
            Err(_) => log::warn!("could not create image element for preload of {}", i),
        }
    }
}

pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|win| win.performance())
        .map(|perf| perf.now())
        .unwrap_or(0.0)
}

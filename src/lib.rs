//! Full-screen gallery viewer with pinch, pan and swipe navigation.
//!
//! The gesture engine in [`state`] is plain Rust and runs anywhere; the Yew
//! components in [`components`] wire it to browser pointer events.

pub mod components;
pub mod config;
pub mod model;
pub mod state;
pub mod util;

pub use config::{ConfigError, GestureConfig};
pub use state::GestureEngine;

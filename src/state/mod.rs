pub mod animation;
pub mod classifier;
pub mod engine;
pub mod resolver;
pub mod session;
pub mod transform;

pub use animation::SettleAnimation;
pub use engine::{GestureEngine, NavigationOutcome};
pub use resolver::Resolution;
pub use session::{GestureSession, SessionMode};

//! Tweezing Core (engine-agnostic)
//!
//! Animates a value from its current state toward a target as an external clock
//! reports elapsed time. Leaf values are driven by [`ScalarTween`]; arrays and
//! records by [`CompositeTween`], which runs one child tween per element. The
//! [`Tweener`] binding handles retargeting a tween mid-flight.

pub mod binding;
pub mod clock;
pub mod composite;
pub mod config;
pub mod easing;
pub mod error;
pub mod events;
pub mod interp;
pub mod scalar;
pub mod tween;

// Re-exports for consumers (binding layers)
pub use binding::Tweener;
pub use clock::{Clock, ClockHandle, ManualClock, SubscriptionId, TickCallback};
pub use composite::CompositeTween;
pub use config::{TweenConfig, TweenOptions, DEFAULT_DELAY_MS, DEFAULT_DURATION_MS};
pub use easing::{Easing, EasingFn};
pub use error::{Result, TweenError};
pub use events::{Emitter, ListenerId, TweenEvent};
pub use interp::{default_interpolate, InterpolateFn, Interpolation};
pub use scalar::ScalarTween;
pub use tween::Tween;
pub use tweezing_api_core::{Key, Structure, Value, ValueKind};

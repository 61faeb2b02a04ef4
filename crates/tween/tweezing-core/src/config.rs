//! Tween configuration: serializable timing options and the full per-tween
//! config carrying collaborators.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tweezing_api_core::Value;

use crate::clock::Clock;
use crate::easing::{Easing, EasingFn};
use crate::error::{Result, TweenError};
use crate::interp::{default_interpolate, InterpolateFn};

pub const DEFAULT_DURATION_MS: f32 = 1000.0;
pub const DEFAULT_DELAY_MS: f32 = 0.0;

/// Timing options as supplied by a binding layer or a JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenOptions {
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::Linear,
        }
    }
}

impl TweenOptions {
    pub fn validate(&self) -> Result<()> {
        check_ms("delay_ms", self.delay_ms)?;
        check_ms("duration_ms", self.duration_ms)
    }
}

fn check_ms(field: &'static str, value: f32) -> Result<()> {
    // NaN fails this comparison too.
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TweenError::InvalidConfig { field, value })
    }
}

/// Everything one tween needs. Immutable once handed to a tween.
#[derive(Clone)]
pub struct TweenConfig {
    pub from: Value,
    pub to: Value,
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub easing: EasingFn,
    pub interpolate: InterpolateFn,
    pub clock: Rc<dyn Clock>,
}

impl fmt::Debug for TweenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenConfig")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("delay_ms", &self.delay_ms)
            .field("duration_ms", &self.duration_ms)
            .finish_non_exhaustive()
    }
}

impl TweenConfig {
    /// Defaults: no delay, [`DEFAULT_DURATION_MS`], linear easing, linear interpolation.
    pub fn new(from: Value, to: Value, clock: Rc<dyn Clock>) -> Self {
        Self::from_options(from, to, &TweenOptions::default(), clock)
    }

    pub fn from_options(
        from: Value,
        to: Value,
        options: &TweenOptions,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            from,
            to,
            delay_ms: options.delay_ms,
            duration_ms: options.duration_ms,
            easing: options.easing.into_fn(),
            interpolate: default_interpolate(),
            clock,
        }
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing.into_fn();
        self
    }

    pub fn with_easing_fn(mut self, easing: impl Fn(f32) -> f32 + 'static) -> Self {
        self.easing = Rc::new(easing);
        self
    }

    pub fn with_interpolate(mut self, interpolate: InterpolateFn) -> Self {
        self.interpolate = interpolate;
        self
    }

    /// Apply timing from options, keeping endpoints and collaborators.
    pub fn with_options(mut self, options: &TweenOptions) -> Self {
        self.delay_ms = options.delay_ms;
        self.duration_ms = options.duration_ms;
        self.easing = options.easing.into_fn();
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_ms("delay_ms", self.delay_ms)?;
        check_ms("duration_ms", self.duration_ms)
    }

    /// Same timing and collaborators, new endpoints.
    pub fn retarget(&self, from: Value, to: Value) -> Self {
        Self {
            from,
            to,
            delay_ms: self.delay_ms,
            duration_ms: self.duration_ms,
            easing: Rc::clone(&self.easing),
            interpolate: Rc::clone(&self.interpolate),
            clock: Rc::clone(&self.clock),
        }
    }

    /// Config for one child of a composite; timing is inherited unchanged.
    #[inline]
    pub(crate) fn child(&self, from: Value, to: Value) -> Self {
        self.retarget(from, to)
    }
}

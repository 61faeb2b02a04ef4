//! Tween: a leaf or a branch over the same surface, chosen from the shape of `to`.

use tweezing_api_core::Value;

use crate::composite::CompositeTween;
use crate::config::TweenConfig;
use crate::error::Result;
use crate::events::{Emitter, ListenerId};
use crate::scalar::ScalarTween;

#[derive(Debug)]
pub enum Tween {
    Scalar(ScalarTween),
    Composite(CompositeTween),
}

impl Tween {
    pub fn new(config: TweenConfig) -> Result<Self> {
        Self::with_emitter(config, Emitter::new())
    }

    /// Arrays and records become composites; every other value is a leaf.
    pub fn with_emitter(config: TweenConfig, emitter: Emitter) -> Result<Self> {
        if config.to.is_structured() {
            CompositeTween::with_emitter(config, emitter).map(Tween::Composite)
        } else {
            ScalarTween::with_emitter(config, emitter).map(Tween::Scalar)
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Tween::Scalar(t) => t.value(),
            Tween::Composite(t) => t.value(),
        }
    }

    pub fn from(&self) -> Value {
        match self {
            Tween::Scalar(t) => t.from(),
            Tween::Composite(t) => t.from(),
        }
    }

    pub fn to(&self) -> Value {
        match self {
            Tween::Scalar(t) => t.to(),
            Tween::Composite(t) => t.to(),
        }
    }

    pub fn stop(&self) {
        match self {
            Tween::Scalar(t) => t.stop(),
            Tween::Composite(t) => t.stop(),
        }
    }

    pub fn has_started(&self) -> bool {
        match self {
            Tween::Scalar(t) => t.has_started(),
            Tween::Composite(t) => t.has_started(),
        }
    }

    pub fn has_ended(&self) -> bool {
        match self {
            Tween::Scalar(t) => t.has_ended(),
            Tween::Composite(t) => t.has_ended(),
        }
    }

    pub fn delay_ms(&self) -> f32 {
        match self {
            Tween::Scalar(t) => t.delay_ms(),
            Tween::Composite(t) => t.delay_ms(),
        }
    }

    pub fn duration_ms(&self) -> f32 {
        match self {
            Tween::Scalar(t) => t.duration_ms(),
            Tween::Composite(t) => t.duration_ms(),
        }
    }

    pub fn emitter(&self) -> &Emitter {
        match self {
            Tween::Scalar(t) => t.emitter(),
            Tween::Composite(t) => t.emitter(),
        }
    }

    pub fn on_start(&self, listener: impl FnMut() + 'static) -> ListenerId {
        self.emitter().on_start(listener)
    }

    pub fn on_end(&self, listener: impl FnMut() + 'static) -> ListenerId {
        self.emitter().on_end(listener)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.emitter().off(id)
    }

    pub fn as_scalar(&self) -> Option<&ScalarTween> {
        match self {
            Tween::Scalar(t) => Some(t),
            Tween::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeTween> {
        match self {
            Tween::Composite(t) => Some(t),
            Tween::Scalar(_) => None,
        }
    }
}

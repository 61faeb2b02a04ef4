//! Tweener: the binding-side owner of a live tween.
//!
//! Assigning a new target stops the current tween, reads its value, and starts a
//! replacement from that value, so the animated value never jumps. Start/end of
//! every underlying tween are re-emitted on the tweener's own emitter.

use std::rc::Rc;

use log::debug;
use tweezing_api_core::Value;

use crate::clock::Clock;
use crate::config::{TweenConfig, TweenOptions};
use crate::error::Result;
use crate::events::{Emitter, ListenerId, TweenEvent};
use crate::tween::Tween;

#[derive(Debug)]
pub struct Tweener {
    template: TweenConfig,
    tween: Tween,
    emitter: Emitter,
}

impl Tweener {
    /// Start resting at `initial` (a tween from `initial` to itself).
    pub fn new(initial: Value, options: &TweenOptions, clock: Rc<dyn Clock>) -> Result<Self> {
        let config = TweenConfig::from_options(initial.clone(), initial, options, clock);
        Self::with_emitter(config, Emitter::new())
    }

    /// Start with an explicit first config. Listeners already registered on
    /// `emitter` see the first tween's events.
    pub fn with_emitter(config: TweenConfig, emitter: Emitter) -> Result<Self> {
        let tween = Tween::with_emitter(config.clone(), relay(&emitter))?;
        Ok(Self {
            template: config,
            tween,
            emitter,
        })
    }

    /// Redirect toward `to`, continuing from the current value.
    pub fn set_to(&mut self, to: Value) -> Result<()> {
        self.tween.stop();
        let from = self.tween.value();
        debug!("retarget {from:?} -> {to:?}");
        let config = self.template.retarget(from, to);
        let next = Tween::with_emitter(config.clone(), relay(&self.emitter))?;
        self.template = config;
        self.tween = next;
        Ok(())
    }

    /// Timing used by the next [`Tweener::set_to`]; the running tween is unaffected.
    /// Invalid options are rejected and the previous timing is kept.
    pub fn set_options(&mut self, options: &TweenOptions) -> Result<()> {
        options.validate()?;
        self.template = self.template.clone().with_options(options);
        Ok(())
    }

    pub fn value(&self) -> Value {
        self.tween.value()
    }

    /// Most recently assigned target.
    pub fn to(&self) -> Value {
        self.template.to.clone()
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn stop(&self) {
        self.tween.stop();
    }

    pub fn on_start(&self, listener: impl FnMut() + 'static) -> ListenerId {
        self.emitter.on_start(listener)
    }

    pub fn on_end(&self, listener: impl FnMut() + 'static) -> ListenerId {
        self.emitter.on_end(listener)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }
}

/// A fresh emitter for one underlying tween that forwards into `out`.
fn relay(out: &Emitter) -> Emitter {
    let relay = Emitter::new();
    for event in [TweenEvent::Start, TweenEvent::End] {
        let out = out.clone();
        relay.on(event, move |e| out.emit(e));
    }
    relay
}

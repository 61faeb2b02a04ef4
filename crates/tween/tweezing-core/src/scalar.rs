//! ScalarTween: one leaf value driven by one clock subscription.
//!
//! State transitions happen only inside the tick callback or `stop`. Borrows of
//! the shared state are always released before listeners run, so listeners may
//! read the value, stop the tween, or drop it.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace, warn};
use tweezing_api_core::Value;

use crate::clock::{ClockHandle, TickCallback};
use crate::config::TweenConfig;
use crate::easing::EasingFn;
use crate::error::Result;
use crate::events::{Emitter, ListenerId, TweenEvent};
use crate::interp::Interpolation;

struct ScalarState {
    from: Value,
    to: Value,
    delay_ms: f32,
    duration_ms: f32,
    easing: EasingFn,
    interpolation: Interpolation,
    current: Value,
    started: bool,
    ended: bool,
    stopped: bool,
    subscription: Option<Box<dyn ClockHandle>>,
}

impl ScalarState {
    #[inline]
    fn is_done(&self) -> bool {
        self.ended || self.stopped
    }
}

pub struct ScalarTween {
    state: Rc<RefCell<ScalarState>>,
    emitter: Emitter,
}

impl std::fmt::Debug for ScalarTween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.state.borrow();
        f.debug_struct("ScalarTween")
            .field("from", &s.from)
            .field("to", &s.to)
            .field("current", &s.current)
            .field("started", &s.started)
            .field("ended", &s.ended)
            .field("stopped", &s.stopped)
            .finish()
    }
}

impl ScalarTween {
    pub fn new(config: TweenConfig) -> Result<Self> {
        Self::with_emitter(config, Emitter::new())
    }

    /// Build with a pre-populated emitter; its listeners observe a first tick
    /// delivered synchronously by the clock during construction.
    pub fn with_emitter(config: TweenConfig, emitter: Emitter) -> Result<Self> {
        config.validate()?;
        let TweenConfig {
            from,
            to,
            delay_ms,
            duration_ms,
            easing,
            interpolate,
            clock,
        } = config;
        let interpolation = interpolate(&from, &to);
        let state = Rc::new(RefCell::new(ScalarState {
            current: from.clone(),
            from,
            to,
            delay_ms,
            duration_ms,
            easing,
            interpolation,
            started: false,
            ended: false,
            stopped: false,
            subscription: None,
        }));

        let weak = Rc::downgrade(&state);
        let tick_emitter = emitter.clone();
        let callback: TickCallback = Box::new(move |elapsed| {
            if let Some(state) = weak.upgrade() {
                tick(&state, &tick_emitter, elapsed);
            }
        });
        debug!("tween subscribe delay_ms={delay_ms} duration_ms={duration_ms}");
        let mut handle = clock.subscribe(callback, delay_ms);

        // The clock may have driven the tween to completion synchronously.
        let finished = state.borrow().is_done();
        if finished {
            handle.stop();
        } else {
            state.borrow_mut().subscription = Some(handle);
        }
        Ok(Self { state, emitter })
    }

    /// Latest interpolated value.
    pub fn value(&self) -> Value {
        self.state.borrow().current.clone()
    }

    pub fn from(&self) -> Value {
        self.state.borrow().from.clone()
    }

    pub fn to(&self) -> Value {
        self.state.borrow().to.clone()
    }

    pub fn delay_ms(&self) -> f32 {
        self.state.borrow().delay_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.state.borrow().duration_ms
    }

    pub fn has_started(&self) -> bool {
        self.state.borrow().started
    }

    pub fn has_ended(&self) -> bool {
        self.state.borrow().ended
    }

    pub fn is_stopped(&self) -> bool {
        self.state.borrow().stopped
    }

    /// Still subscribed to the clock.
    pub fn is_running(&self) -> bool {
        self.state.borrow().subscription.is_some()
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

    /// Release the clock subscription without emitting `end`. The value stays
    /// at its last computed state. Idempotent.
    pub fn stop(&self) {
        let handle = {
            let mut s = self.state.borrow_mut();
            s.stopped = true;
            s.subscription.take()
        };
        if let Some(mut handle) = handle {
            debug!("tween stop at {:?}", self.state.borrow().current);
            handle.stop();
        }
    }
}

impl Drop for ScalarTween {
    fn drop(&mut self) {
        let handle = match self.state.try_borrow_mut() {
            Ok(mut s) => {
                s.stopped = true;
                s.subscription.take()
            }
            Err(_) => None,
        };
        if let Some(mut handle) = handle {
            handle.stop();
        }
    }
}

fn tick(state: &Rc<RefCell<ScalarState>>, emitter: &Emitter, elapsed: f32) {
    // A clock that still delivers after stop, or a re-entrant delivery, is ignored.
    let first = match state.try_borrow_mut() {
        Ok(mut s) => {
            if s.is_done() {
                return;
            }
            !std::mem::replace(&mut s.started, true)
        }
        Err(_) => return,
    };
    if first {
        debug!("tween start");
        emitter.emit(TweenEvent::Start);
    }

    let (ended, handle) = {
        let mut s = state.borrow_mut();
        // A start listener may have stopped us.
        if s.is_done() {
            return;
        }
        let elapsed = if elapsed > 0.0 { elapsed } else { 0.0 };
        let raw = if elapsed >= s.duration_ms {
            1.0
        } else {
            (elapsed / s.duration_ms).clamp(0.0, 1.0)
        };
        let eased = (s.easing)(raw);
        trace!("tween tick elapsed={elapsed} progress={raw} eased={eased}");
        if raw >= 1.0 {
            if eased != 1.0 {
                warn!("easing maps 1 to {eased}; forcing final value to target");
            }
            s.current = s.to.clone();
            s.ended = true;
            (true, s.subscription.take())
        } else {
            s.current = (s.interpolation)(eased);
            (false, None)
        }
    };
    if let Some(mut handle) = handle {
        handle.stop();
    }
    if ended {
        debug!("tween end");
        emitter.emit(TweenEvent::End);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    fn clock() -> ManualClock {
        ManualClock::new()
    }

    fn cfg(clock: &ManualClock, from: f32, to: f32) -> TweenConfig {
        let c: Rc<dyn Clock> = Rc::new(clock.clone());
        TweenConfig::new(Value::f(from), Value::f(to), c)
    }

    #[test]
    fn value_starts_at_from_before_any_tick() {
        let clock = clock();
        let tween = ScalarTween::new(cfg(&clock, 3.0, 7.0)).unwrap();
        assert_eq!(tween.value(), Value::f(3.0));
        assert!(!tween.has_started());
        assert!(tween.is_running());
        assert_eq!(clock.active_count(), 1);
    }

    #[test]
    fn zero_duration_starts_and_ends_on_first_tick() {
        let clock = clock();
        let tween = ScalarTween::new(cfg(&clock, 0.0, 5.0).with_duration(0.0)).unwrap();
        clock.advance(0.0);
        assert!(tween.has_started());
        assert!(tween.has_ended());
        assert_eq!(tween.value(), Value::f(5.0));
        assert_eq!(clock.active_count(), 0);
    }

    #[test]
    fn negative_elapsed_reads_as_zero() {
        let clock = clock();
        let tween = ScalarTween::new(cfg(&clock, 1.0, 2.0)).unwrap();
        let id = clock.subscription_ids()[0];
        clock.elapse(id, -50.0);
        assert!(tween.has_started());
        assert_eq!(tween.value(), Value::f(1.0));
    }

    #[test]
    fn synchronous_completion_releases_subscription() {
        let clock = ManualClock::new().with_immediate_tick();
        let tween = ScalarTween::new(cfg(&clock, 0.0, 1.0).with_duration(0.0)).unwrap();
        assert!(tween.has_ended());
        assert!(!tween.is_running());
        assert_eq!(clock.active_count(), 0);
    }

    #[test]
    fn drop_releases_subscription() {
        let clock = clock();
        let tween = ScalarTween::new(cfg(&clock, 0.0, 1.0)).unwrap();
        assert_eq!(clock.active_count(), 1);
        drop(tween);
        assert_eq!(clock.active_count(), 0);
    }
}

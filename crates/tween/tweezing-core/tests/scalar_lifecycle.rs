use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tweezing_core::{
    Clock, ClockHandle, ManualClock, ScalarTween, TickCallback, TweenConfig, TweenError, Value,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn float(v: Value) -> f32 {
    v.as_float().expect("float value")
}

fn counters(tween: &ScalarTween) -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let starts = Rc::new(Cell::new(0));
    let ends = Rc::new(Cell::new(0));
    let s = Rc::clone(&starts);
    tween.on_start(move || s.set(s.get() + 1));
    let e = Rc::clone(&ends);
    tween.on_end(move || e.set(e.get() + 1));
    (starts, ends)
}

fn config(clock: &ManualClock, from: f32, to: f32) -> TweenConfig {
    let c: Rc<dyn Clock> = Rc::new(clock.clone());
    TweenConfig::new(Value::f(from), Value::f(to), c)
}

/// it should go 0 -> 0.5 -> 1 over 1000ms with linear easing, start and end once
#[test]
fn linear_scalar_over_one_second() {
    let clock = ManualClock::new();
    let tween = ScalarTween::new(config(&clock, 0.0, 1.0).with_duration(1000.0)).unwrap();
    let (starts, ends) = counters(&tween);

    clock.advance(0.0);
    assert_eq!(float(tween.value()), 0.0);
    assert_eq!(starts.get(), 1);
    assert!(tween.has_started());

    clock.advance(500.0);
    approx(float(tween.value()), 0.5, 1e-6);
    assert!(!tween.has_ended());
    assert_eq!(ends.get(), 0);

    clock.advance(500.0);
    assert_eq!(float(tween.value()), 1.0);
    assert!(tween.has_ended());
    assert_eq!(starts.get(), 1);
    assert_eq!(ends.get(), 1);
    assert_eq!(clock.active_count(), 0);

    // Nothing fires once ended.
    clock.advance(500.0);
    assert_eq!(ends.get(), 1);
}

/// it should emit start before the first value is computed
#[test]
fn start_listener_sees_from_value() {
    let clock = ManualClock::new();
    let tween = Rc::new(ScalarTween::new(config(&clock, 2.0, 4.0).with_duration(100.0)).unwrap());
    let seen = Rc::new(RefCell::new(None));
    {
        let seen = Rc::clone(&seen);
        let weak = Rc::downgrade(&tween);
        tween.on_start(move || {
            if let Some(t) = weak.upgrade() {
                *seen.borrow_mut() = Some(t.value());
            }
        });
    }
    clock.advance(50.0);
    assert_eq!(*seen.borrow(), Some(Value::f(2.0)));
    approx(float(tween.value()), 3.0, 1e-6);
}

/// it should land exactly on `to` even when easing(1) != 1
#[test]
fn end_value_is_forced_to_target() {
    let clock = ManualClock::new();
    let tween = ScalarTween::new(
        config(&clock, 0.0, 10.0)
            .with_duration(100.0)
            .with_easing_fn(|t| t * 0.9),
    )
    .unwrap();
    clock.advance(50.0);
    approx(float(tween.value()), 4.5, 1e-5);
    clock.advance(50.0);
    assert_eq!(tween.value(), Value::f(10.0));
    assert!(tween.has_ended());
}

/// it should complete on an infinite elapsed time
#[test]
fn infinite_elapsed_forces_completion() {
    let clock = ManualClock::new();
    let tween = ScalarTween::new(config(&clock, 0.0, 3.0)).unwrap();
    let (starts, ends) = counters(&tween);
    clock.finish(clock.subscription_ids()[0]);
    assert_eq!(tween.value(), Value::f(3.0));
    assert_eq!((starts.get(), ends.get()), (1, 1));
}

/// it should be idempotent to stop, keep the last value, and never emit end
#[test]
fn stop_is_idempotent_and_silent() {
    let clock = ManualClock::new();
    let tween = ScalarTween::new(config(&clock, 0.0, 1.0).with_duration(1000.0)).unwrap();
    let (_, ends) = counters(&tween);
    clock.advance(250.0);
    tween.stop();
    tween.stop();
    clock.advance(2000.0);
    approx(float(tween.value()), 0.25, 1e-6);
    assert!(tween.is_stopped());
    assert!(!tween.has_ended());
    assert_eq!(ends.get(), 0);
    assert_eq!(clock.active_count(), 0);
}

/// A clock that ignores stop and keeps every callback.
#[derive(Clone, Default)]
struct LeakyClock {
    callbacks: Rc<RefCell<Vec<Rc<RefCell<TickCallback>>>>>,
}

struct IgnoredHandle;

impl ClockHandle for IgnoredHandle {
    fn stop(&mut self) {}
}

impl Clock for LeakyClock {
    fn subscribe(&self, callback: TickCallback, _delay_ms: f32) -> Box<dyn ClockHandle> {
        self.callbacks
            .borrow_mut()
            .push(Rc::new(RefCell::new(callback)));
        Box::new(IgnoredHandle)
    }
}

impl LeakyClock {
    fn fire(&self, elapsed: f32) {
        let cbs: Vec<_> = self.callbacks.borrow().iter().cloned().collect();
        for cb in cbs {
            (&mut *cb.borrow_mut())(elapsed);
        }
    }
}

/// it should ignore ticks a clock delivers after stop
#[test]
fn ticks_after_stop_do_not_mutate() {
    let clock = LeakyClock::default();
    let c: Rc<dyn Clock> = Rc::new(clock.clone());
    let tween =
        ScalarTween::new(TweenConfig::new(Value::f(0.0), Value::f(1.0), c).with_duration(100.0))
            .unwrap();
    let (_, ends) = counters(&tween);
    clock.fire(40.0);
    tween.stop();
    clock.fire(100.0);
    approx(float(tween.value()), 0.4, 1e-6);
    assert_eq!(ends.get(), 0);
}

/// it should ignore ticks a clock delivers after end
#[test]
fn ticks_after_end_do_not_reemit() {
    let clock = LeakyClock::default();
    let c: Rc<dyn Clock> = Rc::new(clock.clone());
    let tween =
        ScalarTween::new(TweenConfig::new(Value::f(0.0), Value::f(1.0), c).with_duration(100.0))
            .unwrap();
    let (starts, ends) = counters(&tween);
    clock.fire(100.0);
    clock.fire(50.0);
    assert_eq!(tween.value(), Value::f(1.0));
    assert_eq!((starts.get(), ends.get()), (1, 1));
}

/// it should subscribe with the configured delay and receive elapsed time net of it
#[test]
fn delay_is_handed_to_the_clock() {
    let clock = ManualClock::new();
    let tween = ScalarTween::new(
        config(&clock, 0.0, 1.0)
            .with_delay(500.0)
            .with_duration(1000.0),
    )
    .unwrap();
    assert_eq!(tween.delay_ms(), 500.0);
    assert_eq!(clock.delay_of(clock.subscription_ids()[0]), Some(500.0));

    clock.advance(400.0);
    assert!(!tween.has_started());
    clock.advance(100.0);
    assert!(tween.has_started());
    assert_eq!(float(tween.value()), 0.0);
    clock.advance(500.0);
    approx(float(tween.value()), 0.5, 1e-6);
}

/// it should reject negative timing without subscribing
#[test]
fn invalid_timing_fails_fast() {
    let clock = ManualClock::new();
    let err = ScalarTween::new(config(&clock, 0.0, 1.0).with_delay(-1.0)).unwrap_err();
    assert!(matches!(err, TweenError::InvalidConfig { field: "delay_ms", .. }));
    let err = ScalarTween::new(config(&clock, 0.0, 1.0).with_duration(-0.5)).unwrap_err();
    assert!(matches!(err, TweenError::InvalidConfig { field: "duration_ms", .. }));
    assert!(clock.subscribed_delays().is_empty());
}

/// it should interpolate colors as a single leaf
#[test]
fn color_leaf_interpolates_componentwise() {
    let clock = ManualClock::new();
    let c: Rc<dyn Clock> = Rc::new(clock.clone());
    let tween = ScalarTween::new(
        TweenConfig::new(
            Value::color(0.0, 0.0, 0.0, 1.0),
            Value::color(1.0, 1.0, 0.0, 1.0),
            c,
        )
        .with_duration(100.0),
    )
    .unwrap();
    clock.advance(25.0);
    assert_eq!(tween.value(), Value::color(0.25, 0.25, 0.0, 1.0));
    assert_eq!(clock.active_count(), 1);
}

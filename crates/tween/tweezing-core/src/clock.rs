//! Clock collaborator contract and a deterministic manual clock.
//!
//! A clock repeatedly invokes a tick callback with the milliseconds elapsed since
//! the subscription's delay ran out, until the returned handle is stopped. The
//! tween never re-applies the delay itself.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::trace;

/// Tick callback: receives elapsed milliseconds, net of the subscription delay.
/// `f32::INFINITY` is a valid way to force completion.
pub type TickCallback = Box<dyn FnMut(f32)>;

pub trait Clock {
    fn subscribe(&self, callback: TickCallback, delay_ms: f32) -> Box<dyn ClockHandle>;
}

/// Severs a subscription. Calling `stop` more than once is harmless.
pub trait ClockHandle {
    fn stop(&mut self);
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionId(pub u32);

type SharedCallback = Rc<RefCell<TickCallback>>;

struct Slot {
    id: SubscriptionId,
    subscribed_at: f32,
    delay_ms: f32,
    callback: SharedCallback,
}

#[derive(Default)]
struct ClockState {
    now: f32,
    paused: bool,
    immediate: bool,
    next_id: u32,
    slots: Vec<Slot>,
    /// Delay requested by every subscription ever made, in subscription order.
    history: Vec<(SubscriptionId, f32)>,
}

/// Single-threaded clock advanced explicitly by the host loop or a test.
///
/// Clones share the same timeline.
#[derive(Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ClockState>>,
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ManualClock")
            .field("now", &state.now)
            .field("paused", &state.paused)
            .field("active", &state.slots.len())
            .finish()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `callback(0)` synchronously from `subscribe` when the delay is zero.
    pub fn with_immediate_tick(self) -> Self {
        self.inner.borrow_mut().immediate = true;
        self
    }

    #[inline]
    pub fn now(&self) -> f32 {
        self.inner.borrow().now
    }

    pub fn pause(&self) {
        self.inner.borrow_mut().paused = true;
    }

    pub fn resume(&self) {
        self.inner.borrow_mut().paused = false;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.inner.borrow().paused
    }

    /// Number of subscriptions not yet stopped.
    pub fn active_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Active subscriptions, oldest first.
    pub fn subscription_ids(&self) -> Vec<SubscriptionId> {
        self.inner.borrow().slots.iter().map(|s| s.id).collect()
    }

    pub fn is_active(&self, id: SubscriptionId) -> bool {
        self.inner.borrow().slots.iter().any(|s| s.id == id)
    }

    /// Delay requested by an active subscription.
    pub fn delay_of(&self, id: SubscriptionId) -> Option<f32> {
        self.inner
            .borrow()
            .slots
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.delay_ms)
    }

    /// Delays of every subscription ever made, in order, including stopped ones.
    pub fn subscribed_delays(&self) -> Vec<f32> {
        self.inner.borrow().history.iter().map(|(_, d)| *d).collect()
    }

    /// Move time forward and tick every subscription whose delay has passed.
    /// Subscriptions created while ticking receive their first tick next time.
    pub fn advance(&self, dt_ms: f32) {
        let targets: Vec<(SubscriptionId, SharedCallback, f32)> = {
            let mut state = self.inner.borrow_mut();
            if state.paused {
                return;
            }
            state.now += dt_ms.max(0.0);
            let now = state.now;
            state
                .slots
                .iter()
                .filter_map(|s| {
                    let since = now - s.subscribed_at;
                    (since >= s.delay_ms)
                        .then(|| (s.id, Rc::clone(&s.callback), since - s.delay_ms))
                })
                .collect()
        };
        trace!("clock advance now={} ticks={}", self.now(), targets.len());
        self.deliver(targets);
    }

    /// Deliver an arbitrary elapsed time to one subscription.
    pub fn elapse(&self, id: SubscriptionId, elapsed_ms: f32) {
        let target = self
            .inner
            .borrow()
            .slots
            .iter()
            .find(|s| s.id == id)
            .map(|s| (s.id, Rc::clone(&s.callback), elapsed_ms));
        if let Some(target) = target {
            self.deliver(vec![target]);
        }
    }

    /// Force one subscription to completion.
    pub fn finish(&self, id: SubscriptionId) {
        self.elapse(id, f32::INFINITY);
    }

    /// Force every active subscription to completion.
    pub fn finish_all(&self) {
        for id in self.subscription_ids() {
            self.finish(id);
        }
    }

    fn deliver(&self, targets: Vec<(SubscriptionId, SharedCallback, f32)>) {
        for (id, callback, elapsed) in targets {
            // An earlier callback in this round may have stopped this one.
            if !self.is_active(id) {
                continue;
            }
            // Never re-enter a callback that is still running.
            if let Ok(mut f) = callback.try_borrow_mut() {
                (&mut *f)(elapsed);
            }
        }
    }
}

struct ManualHandle {
    id: SubscriptionId,
    clock: Weak<RefCell<ClockState>>,
}

impl ClockHandle for ManualHandle {
    fn stop(&mut self) {
        if let Some(state) = self.clock.upgrade() {
            let removed: Vec<Slot> = {
                let mut state = state.borrow_mut();
                let (gone, kept): (Vec<Slot>, Vec<Slot>) =
                    state.slots.drain(..).partition(|s| s.id == self.id);
                state.slots = kept;
                gone
            };
            // Callbacks are dropped outside the borrow.
            drop(removed);
        }
    }
}

impl Clock for ManualClock {
    fn subscribe(&self, callback: TickCallback, delay_ms: f32) -> Box<dyn ClockHandle> {
        let callback: SharedCallback = Rc::new(RefCell::new(callback));
        let (id, immediate) = {
            let mut state = self.inner.borrow_mut();
            let id = SubscriptionId(state.next_id);
            state.next_id = state.next_id.wrapping_add(1);
            let subscribed_at = state.now;
            state.slots.push(Slot {
                id,
                subscribed_at,
                delay_ms,
                callback: Rc::clone(&callback),
            });
            state.history.push((id, delay_ms));
            (id, state.immediate && delay_ms <= 0.0)
        };
        trace!("clock subscribe id={} delay_ms={delay_ms}", id.0);
        if immediate {
            self.deliver(vec![(id, callback, 0.0)]);
        }
        Box::new(ManualHandle {
            id,
            clock: Rc::downgrade(&self.inner),
        })
    }
}

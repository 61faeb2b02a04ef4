//! Start/end notifications.
//!
//! An [`Emitter`] is a cheaply clonable handle to one listener list; clones share
//! the list. Listeners run synchronously, in registration order.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use serde::{Deserialize, Serialize};

/// Lifecycle signals emitted by every tween kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenEvent {
    /// Progress began (first tick delivered by the clock)
    Start,
    /// Progress completed; the value now equals the target
    End,
}

impl TweenEvent {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(pub u64);

type Listener = Rc<RefCell<dyn FnMut(TweenEvent)>>;

struct Entry {
    id: ListenerId,
    event: TweenEvent,
    listener: Listener,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<Entry>,
}

#[derive(Clone, Default)]
pub struct Emitter {
    inner: Rc<RefCell<Listeners>>,
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind.
    pub fn on(&self, event: TweenEvent, listener: impl FnMut(TweenEvent) + 'static) -> ListenerId {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.entries.push(Entry {
            id,
            event,
            listener,
        });
        id
    }

    pub fn on_start(&self, mut listener: impl FnMut() + 'static) -> ListenerId {
        self.on(TweenEvent::Start, move |_| listener())
    }

    pub fn on_end(&self, mut listener: impl FnMut() + 'static) -> ListenerId {
        self.on(TweenEvent::End, move |_| listener())
    }

    /// Unregister; returns whether the id was known.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        inner.entries.len() != before
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }

    pub fn listener_count(&self, event: TweenEvent) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.event == event)
            .count()
    }

    /// Call each listener registered for `event` once. The listener set is
    /// snapshotted first, so listeners may register or unregister freely.
    pub fn emit(&self, event: TweenEvent) {
        let targets: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.event == event)
            .map(|e| Rc::clone(&e.listener))
            .collect();
        for target in targets {
            // A listener re-emitting its own event is skipped rather than re-entered.
            match target.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(event),
                Err(_) => trace!("skipped re-entrant {} listener", event.name()),
            }
        }
    }
}

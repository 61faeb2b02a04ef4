//! CompositeTween: one child tween per element of an array or field of a record.
//!
//! Children tick independently. The composite emits `start` on the first child
//! start (latch) and `end` when the last pending child ends (countdown), so the
//! aggregate signal does not depend on child arrival order.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use tweezing_api_core::{Key, Structure, Value};

use crate::config::TweenConfig;
use crate::error::{Result, TweenError};
use crate::events::{Emitter, ListenerId, TweenEvent};
use crate::tween::Tween;

#[derive(Debug)]
struct Aggregate {
    pending: usize,
    started: bool,
    ended: bool,
}

#[derive(Debug)]
pub struct CompositeTween {
    structure: Structure,
    children: Vec<(Key, Tween)>,
    aggregate: Rc<RefCell<Aggregate>>,
    emitter: Emitter,
    from: Value,
    to: Value,
    delay_ms: f32,
    duration_ms: f32,
}

impl CompositeTween {
    pub fn new(config: TweenConfig) -> Result<Self> {
        Self::with_emitter(config, Emitter::new())
    }

    /// Children whose `from` lacks a key of `to` start from that target's zero value.
    pub fn with_emitter(config: TweenConfig, emitter: Emitter) -> Result<Self> {
        // Children inherit this timing unchanged, so validating here covers the
        // whole tree before any child subscribes.
        config.validate()?;
        let structure = config.to.structure().ok_or_else(|| TweenError::NotStructured {
            kind: format!("{:?}", config.to.kind()),
        })?;

        let keys = config.to.keys();
        let aggregate = Rc::new(RefCell::new(Aggregate {
            pending: keys.len(),
            started: false,
            ended: keys.is_empty(),
        }));

        let mut children = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(child_to) = config.to.get(&key).cloned() else {
                continue;
            };
            let child_from = config
                .from
                .get(&key)
                .cloned()
                .unwrap_or_else(|| child_to.zero_like());
            let child_emitter = wire_child(&aggregate, &emitter);
            // On error the children built so far are dropped, which unsubscribes them.
            let child = Tween::with_emitter(config.child(child_from, child_to), child_emitter)?;
            // An empty structured child ends at construction without emitting `end`.
            if child.has_ended() && !child.has_started() {
                settle_child(&aggregate, &emitter);
            }
            children.push((key, child));
        }
        debug!(
            "composite tween {:?} with {} children",
            structure,
            children.len()
        );

        Ok(Self {
            structure,
            children,
            aggregate,
            emitter,
            from: config.from,
            to: config.to,
            delay_ms: config.delay_ms,
            duration_ms: config.duration_ms,
        })
    }

    /// Fresh reconstruction from each child's live value.
    pub fn value(&self) -> Value {
        self.structure.assemble(
            self.children
                .iter()
                .map(|(key, child)| (key.clone(), child.value())),
        )
    }

    pub fn from(&self) -> Value {
        self.from.clone()
    }

    pub fn to(&self) -> Value {
        self.to.clone()
    }

    pub fn structure(&self) -> Structure {
        self.structure
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.children.iter().map(|(k, _)| k)
    }

    pub fn child(&self, key: &Key) -> Option<&Tween> {
        self.children
            .iter()
            .find_map(|(k, c)| (k == key).then_some(c))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children that have not ended yet.
    pub fn pending(&self) -> usize {
        self.aggregate.borrow().pending
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn has_started(&self) -> bool {
        self.aggregate.borrow().started
    }

    pub fn has_ended(&self) -> bool {
        self.aggregate.borrow().ended
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

    /// Stop every child.
    pub fn stop(&self) {
        for (_, child) in &self.children {
            child.stop();
        }
    }
}

fn wire_child(aggregate: &Rc<RefCell<Aggregate>>, parent: &Emitter) -> Emitter {
    let child = Emitter::new();
    {
        let aggregate = Rc::clone(aggregate);
        let parent = parent.clone();
        child.on_start(move || {
            let first = !std::mem::replace(&mut aggregate.borrow_mut().started, true);
            if first {
                parent.emit(TweenEvent::Start);
            }
        });
    }
    {
        let aggregate = Rc::clone(aggregate);
        let parent = parent.clone();
        child.on_end(move || settle_child(&aggregate, &parent));
    }
    child
}

/// Count one child as ended. The last one ends the composite, which emits `end`
/// only if some child has started; a composite of empty children ends silently.
fn settle_child(aggregate: &Rc<RefCell<Aggregate>>, parent: &Emitter) {
    let notify = {
        let mut agg = aggregate.borrow_mut();
        agg.pending = agg.pending.saturating_sub(1);
        let last = agg.pending == 0 && !std::mem::replace(&mut agg.ended, true);
        last && agg.started
    };
    if notify {
        parent.emit(TweenEvent::End);
    }
}

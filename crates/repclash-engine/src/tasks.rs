//! Cancellable task queue for the effect scheduler.
//!
//! One binary heap of `(fire_at, seq)`-ordered entries plus a generation
//! map keyed by `(actor, task kind)`. Arming a task that is already
//! outstanding bumps the generation, so the stale heap entry is dropped
//! lazily when popped. This replaces per-kind timer-handle bookkeeping
//! with a single re-armable abstraction.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use repclash_core::enums::{ActorId, FlashKind};

/// The distinct timers an actor can have outstanding. At most one of each
/// kind per actor; arming again replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// Scheduled reaction to a change event; carries the callout to show.
    FlashStart(FlashKind),
    FlashEnd,
    /// Attack/block/counter fx following the flash after its fixed offset.
    FxStart,
    FxEnd,
    /// Debounced application of a pending HP bar value.
    HpDebounce,
    DrainStart,
    DrainEnd,
}

/// A due task as handed back to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub fire_at_ms: u64,
    pub actor: ActorId,
    pub kind: TaskKind,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    fire_at_ms: u64,
    seq: u64,
    actor: ActorId,
    kind: TaskKind,
    generation: u64,
}

/// Priority queue of scheduled task firings with replace-on-arm semantics.
#[derive(Debug, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    live: HashMap<(ActorId, TaskKind), u64>,
    next_seq: u64,
    next_generation: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the task for `(actor, kind)` to fire at `fire_at_ms`.
    pub fn arm(&mut self, actor: ActorId, kind: TaskKind, fire_at_ms: u64) {
        self.next_generation += 1;
        self.next_seq += 1;
        self.live.insert((actor.clone(), kind), self.next_generation);
        self.heap.push(Reverse(Entry {
            fire_at_ms,
            seq: self.next_seq,
            actor,
            kind,
            generation: self.next_generation,
        }));
    }

    /// Cancel the outstanding task for `(actor, kind)`, if any.
    pub fn cancel(&mut self, actor: &ActorId, kind: TaskKind) {
        self.live.remove(&(actor.clone(), kind));
    }

    /// Whether a task is currently outstanding for `(actor, kind)`.
    pub fn is_armed(&self, actor: &ActorId, kind: TaskKind) -> bool {
        self.live.contains_key(&(actor.clone(), kind))
    }

    /// Drop every outstanding task. Used on battle teardown; nothing armed
    /// before this call can fire afterwards.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    /// Pop the next task due at or before `now_ms`, skipping entries that
    /// were replaced or cancelled since they were pushed.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Task> {
        while let Some(Reverse(entry)) = self.heap.peek() {
            if entry.fire_at_ms > now_ms {
                return None;
            }
            let Reverse(entry) = self.heap.pop()?;
            let key = (entry.actor.clone(), entry.kind);
            if self.live.get(&key) == Some(&entry.generation) {
                self.live.remove(&key);
                return Some(Task {
                    fire_at_ms: entry.fire_at_ms,
                    actor: entry.actor,
                    kind: entry.kind,
                });
            }
            // Stale generation: replaced or cancelled, drop silently.
        }
        None
    }

    /// Number of live (not yet fired or cancelled) tasks.
    pub fn outstanding(&self) -> usize {
        self.live.len()
    }
}

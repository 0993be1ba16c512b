//! Per-entity delay queue for scheduling callbacks after an elapsed time.
//!
//! The [`Delay`] component holds every callback an entity has scheduled. Each
//! frame, [`delay_tick_system`](crate::systems::delay::delay_tick_system)
//! walks the queue and invokes the callbacks whose time has come, rescheduling
//! the repeating ones. While the game is paused the queue stops counting: the
//! pause observers stamp when the clock froze and push every due time back by
//! the paused duration when it resumes.
//!
//! # How It Works
//!
//! 1. An entity schedules a [`DelayCallback`] with a delay in milliseconds and
//!    an optional [`Repeat`] count
//! 2. Each frame the tick system checks `now >= start + delay + paused`:
//!    - Calls the callback with the world and the owning entity
//!    - Reschedules the entry if repeats remain
//!    - Otherwise removes it and calls the optional completion callback
//! 3. [`Delay::cancel`] tombstones every entry sharing the callback reference;
//!    tombstones are compacted by the next tick pass
//!
//! # Example
//!
//! ```ignore
//! let blink = DelayCallback::new(|world, entity| {
//!     // toggle visibility, play a sound, ...
//! });
//!
//! world
//!     .spawn_empty()
//!     .delay(blink.clone(), 250, Repeat::Forever, None)
//!     .delay(DelayCallback::new(|_, _| {}), 1000, 0, None);
//!
//! // later
//! world.entity_mut(entity).cancel_delay(&blink);
//! ```
//!
//! # Related
//!
//! - [`crate::systems::delay`] – tick system and pause/unpause observers
//! - [`crate::events::pause`] – the pause/unpause events
//! - [`crate::resources::clock::Clock`] – millisecond time source

use bevy_ecs::lifecycle::HookContext;
use bevy_ecs::prelude::*;
use bevy_ecs::world::DeferredWorld;
use log::debug;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::resources::clock::Clock;
use crate::resources::gamepause::GamePause;

/// Signature of a delayed callback: the world and the entity that owns the queue.
pub type DelayFn = dyn Fn(&mut World, Entity) + Send + Sync;

/// Shared handle to a delayed callback.
///
/// Cloning the handle keeps the same identity. Two handles compare equal only
/// when they point to the same allocation, which is what [`Delay::cancel`]
/// matches on. Wrapping the same closure twice yields two distinct callbacks.
#[derive(Clone)]
pub struct DelayCallback(Arc<DelayFn>);

impl DelayCallback {
    pub fn new(f: impl Fn(&mut World, Entity) + Send + Sync + 'static) -> Self {
        DelayCallback(Arc::new(f))
    }

    /// Invoke the callback with `entity` as receiver.
    pub fn call(&self, world: &mut World, entity: Entity) {
        (self.0)(world, entity)
    }

    /// Reference identity, ignoring the closure's contents.
    pub fn same_as(&self, other: &DelayCallback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for DelayCallback {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for DelayCallback {}

impl fmt::Debug for DelayCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DelayCallback({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// How many more times an entry fires after the next one.
///
/// `Times(0)` fires once, `Times(n)` fires `n + 1` times in total. Integers
/// convert with the usual convention: negative means [`Repeat::Forever`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Times(u32),
    Forever,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Times(0)
    }
}

impl From<i32> for Repeat {
    fn from(value: i32) -> Self {
        if value < 0 {
            Repeat::Forever
        } else {
            Repeat::Times(value as u32)
        }
    }
}

impl Repeat {
    /// The count left after one more fire, or `None` once exhausted.
    pub fn after_fire(self) -> Option<Repeat> {
        match self {
            Repeat::Forever => Some(Repeat::Forever),
            Repeat::Times(0) => None,
            Repeat::Times(n) => Some(Repeat::Times(n - 1)),
        }
    }
}

/// One scheduled callback.
#[derive(Debug, Clone)]
pub struct DelayEntry {
    /// When the entry was created or last rescheduled (ms).
    pub start_ms: u64,
    /// Requested interval (ms).
    pub delay_ms: u64,
    /// Time spent paused since the last fire (ms).
    pub paused_ms: u64,
    /// When the current pause began, if the entry is paused.
    pub paused_at: Option<u64>,
    pub remaining: Repeat,
    pub callback: DelayCallback,
    /// Invoked once after the last fire. Never reached with [`Repeat::Forever`].
    pub on_complete: Option<DelayCallback>,
}

impl DelayEntry {
    /// Timestamp at or after which the entry fires.
    pub fn due_ms(&self) -> u64 {
        self.start_ms
            .saturating_add(self.delay_ms)
            .saturating_add(self.paused_ms)
    }

    pub fn is_due(&self, now: u64) -> bool {
        now >= self.due_ms()
    }

    fn pause(&mut self, now: u64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    fn unpause(&mut self, now: u64) {
        if let Some(since) = self.paused_at.take() {
            self.paused_ms += now.saturating_sub(since);
        }
    }

    fn reschedule(&mut self, now: u64, remaining: Repeat) {
        self.start_ms = now;
        self.paused_ms = 0;
        self.paused_at = None;
        self.remaining = remaining;
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Live(DelayEntry),
    Canceled,
}

/// Outcome of inspecting one slot during a tick pass.
#[derive(Debug)]
pub(crate) enum SlotPoll {
    /// Not due yet.
    Pending,
    /// A tombstone was found and removed.
    Compacted,
    /// The entry is due; the caller invokes the callback, then calls [`Delay::finish`].
    Due(DelayCallback),
}

/// Queue of delayed callbacks owned by one entity.
///
/// Entries are kept in insertion order and walked in reverse by the tick
/// system, so removing the current slot never skips another one. Callbacks
/// may schedule or cancel on the same queue while it is being walked: new
/// entries are appended behind the cursor and cancellation only tombstones.
///
/// Inserting a queue while the game is paused pauses it at insertion time,
/// however it was built.
#[derive(Component, Debug, Clone, Default)]
#[component(on_insert = pause_if_game_paused)]
pub struct Delay {
    slots: SmallVec<[Slot; 4]>,
    paused_at: Option<u64>,
}

fn pause_if_game_paused(mut world: DeferredWorld, context: HookContext) {
    if !world
        .get_resource::<GamePause>()
        .is_some_and(GamePause::is_paused)
    {
        return;
    }
    let now = Clock::sample(world.get_resource::<Clock>());
    if let Some(mut delay) = world.get_mut::<Delay>(context.entity) {
        debug!("Delay queue inserted on {:?} while paused", context.entity);
        delay.pause(now);
    }
}

impl Delay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` to run `delay_ms` after `now`.
    ///
    /// If the queue is paused, the new entry starts paused at `now` so the
    /// rest of the pause is added to its due time on unpause.
    pub fn schedule(
        &mut self,
        now: u64,
        callback: DelayCallback,
        delay_ms: u64,
        repeat: impl Into<Repeat>,
        on_complete: Option<DelayCallback>,
    ) -> &mut Self {
        let remaining = repeat.into();
        debug!(
            "Scheduling {:?} in {}ms (repeat {:?}) at {}",
            callback, delay_ms, remaining, now
        );
        self.slots.push(Slot::Live(DelayEntry {
            start_ms: now,
            delay_ms,
            paused_ms: 0,
            paused_at: self.paused_at.map(|_| now),
            remaining,
            callback,
            on_complete,
        }));
        self
    }

    /// Cancel every pending entry scheduled with `callback`.
    ///
    /// Canceled entries never fire again and their completion callback is
    /// dropped. Unknown callbacks are ignored.
    pub fn cancel(&mut self, callback: &DelayCallback) -> &mut Self {
        let mut canceled = 0;
        for slot in self.slots.iter_mut().rev() {
            if matches!(slot, Slot::Live(entry) if entry.callback.same_as(callback)) {
                *slot = Slot::Canceled;
                canceled += 1;
            }
        }
        if canceled > 0 {
            debug!("Canceled {} entries for {:?}", canceled, callback);
        }
        self
    }

    /// Cancel everything in the queue.
    pub fn cancel_all(&mut self) -> &mut Self {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Canceled;
        }
        self
    }

    /// Whether a live entry with this callback is pending.
    pub fn is_scheduled(&self, callback: &DelayCallback) -> bool {
        self.entries().any(|entry| entry.callback.same_as(callback))
    }

    /// Live entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &DelayEntry> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Live(entry) => Some(entry),
            Slot::Canceled => None,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Stamp the moment the game clock froze on every live entry.
    ///
    /// Pausing an already paused queue keeps the first timestamp.
    pub fn pause(&mut self, now: u64) {
        if self.paused_at.is_some() {
            return;
        }
        self.paused_at = Some(now);
        for slot in self.slots.iter_mut() {
            if let Slot::Live(entry) = slot {
                entry.pause(now);
            }
        }
    }

    /// Push every paused entry's due time back by the time spent paused.
    pub fn unpause(&mut self, now: u64) {
        if self.paused_at.take().is_none() {
            return;
        }
        for slot in self.slots.iter_mut() {
            if let Slot::Live(entry) = slot {
                entry.unpause(now);
            }
        }
    }

    /// Number of slots, tombstones included. Starting cursor of a tick pass.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Inspect the slot at `index`, compacting it if it is a tombstone.
    pub(crate) fn poll(&mut self, index: usize, now: u64) -> SlotPoll {
        match self.slots.get(index) {
            None => SlotPoll::Pending,
            Some(Slot::Canceled) => {
                self.slots.remove(index);
                SlotPoll::Compacted
            }
            Some(Slot::Live(entry)) if entry.is_due(now) => SlotPoll::Due(entry.callback.clone()),
            Some(Slot::Live(_)) => SlotPoll::Pending,
        }
    }

    /// Settle the slot at `index` after its callback ran.
    ///
    /// Reschedules the entry if repeats remain, otherwise removes it and
    /// returns its completion callback. An entry canceled by its own
    /// callback is removed without completing.
    pub(crate) fn finish(&mut self, index: usize, now: u64) -> Option<DelayCallback> {
        let next = match self.slots.get_mut(index)? {
            Slot::Canceled => {
                self.slots.remove(index);
                return None;
            }
            Slot::Live(entry) => match entry.remaining.after_fire() {
                Some(remaining) => {
                    entry.reschedule(now, remaining);
                    if self.paused_at.is_some() {
                        entry.pause(now);
                    }
                    return None;
                }
                None => entry.on_complete.clone(),
            },
        };
        self.slots.remove(index);
        next
    }
}

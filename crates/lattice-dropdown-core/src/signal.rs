//! Signal/slot notification for dropdown widgets.
//!
//! A [`Signal`] holds any number of connected slots (closures). Emitting the
//! signal invokes every slot, in connection order, on the emitting thread.
//!
//! Widgets in this crate are driven by a single-threaded host that delivers
//! one gesture at a time, so there is no queued or cross-thread invocation:
//! every slot runs before [`Signal::emit`] returns.
//!
//! # Re-entrancy
//!
//! The slot list is snapshotted before any slot runs. A slot may therefore
//! connect or disconnect slots (on this signal or any other) without
//! deadlocking. Changes made during an emission take effect on the next one.
//!
//! # Example
//!
//! ```
//! use lattice_dropdown_core::Signal;
//!
//! let selected = Signal::<String>::new();
//! let id = selected.connect(|value| println!("Selected: {value}"));
//!
//! selected.emit("profile".to_string());
//! assert!(selected.disconnect(id));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifier of a signal-slot connection.
    ///
    /// Returned by [`Signal::connect`] and accepted by [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A connected slot and its position in connection order.
///
/// Slot map indices are reused after a disconnect, so order is kept
/// separately.
struct Connection<Args> {
    seq: u64,
    slot: Slot<Args>,
}

/// A type-safe signal with any number of connected slots.
///
/// `Args` is the value passed (by reference) to each slot. Use `()` for
/// signals without a payload.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    next_seq: AtomicU64,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            next_seq: AtomicU64::new(0),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. The returned id disconnects it again.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.slots.lock().insert(Connection {
            seq,
            slot: Arc::new(slot),
        })
    }

    /// Disconnect a slot by id.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Disconnect every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Suppress (or re-enable) emission.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether emission is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let mut connections: Vec<(u64, Slot<Args>)> = self
            .slots
            .lock()
            .values()
            .map(|connection| (connection.seq, connection.slot.clone()))
            .collect();
        connections.sort_unstable_by_key(|(seq, _)| *seq);
        let slots: Vec<Slot<Args>> = connections.into_iter().map(|(_, slot)| slot).collect();
        tracing::trace!(target: targets::SIGNAL, slot_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

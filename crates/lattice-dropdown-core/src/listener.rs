//! Scoped listener registration.
//!
//! A [`ListenerRegistry`] is a document-level event hook: every listener
//! registered on it sees every event dispatched through it, whatever widget
//! the event was aimed at. Popups use it to observe presses outside their
//! own bounds and to intercept navigation keys.
//!
//! Registration is scoped. [`ListenerRegistry::listen`] returns a
//! [`ListenerGuard`]; the listener stays installed exactly as long as the
//! guard is alive. Dropping the guard (or the widget that owns it) removes
//! the listener, so a destroyed widget can never receive events.
//!
//! ```
//! use lattice_dropdown_core::ListenerRegistry;
//!
//! let keys = ListenerRegistry::<char>::new();
//! let guard = keys.listen(|key| println!("pressed {key}"));
//! assert_eq!(keys.listener_count(), 1);
//!
//! keys.dispatch(&mut 'a');
//! drop(guard);
//! assert_eq!(keys.listener_count(), 0);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifier of an installed listener.
    pub struct ListenerId;
}

type Listener<E> = Arc<dyn Fn(&mut E) + Send + Sync>;
type Listeners<E> = Mutex<SlotMap<ListenerId, Listener<E>>>;

/// A set of listeners for events of type `E`.
///
/// Cloning the registry yields another handle to the same listener set.
pub struct ListenerRegistry<E> {
    listeners: Arc<Listeners<E>>,
}

impl<E: 'static> ListenerRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Install a listener for as long as the returned guard lives.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn listen<F>(&self, listener: F) -> ListenerGuard
    where
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let id = self.listeners.lock().insert(Arc::new(listener));
        tracing::trace!(target: targets::LISTENER, ?id, "listener installed");

        let weak: Weak<Listeners<E>> = Arc::downgrade(&self.listeners);
        ListenerGuard {
            id,
            release: Some(Box::new(move |id| {
                if let Some(listeners) = weak.upgrade() {
                    listeners.lock().remove(id);
                    tracing::trace!(target: targets::LISTENER, ?id, "listener released");
                }
            })),
        }
    }

    /// Deliver `event` to every installed listener.
    ///
    /// Listeners installed or released while dispatching do not affect this
    /// dispatch. Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &mut E) -> usize {
        let snapshot: Vec<Listener<E>> = self.listeners.lock().values().cloned().collect();
        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Whether no listener is installed.
    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }
}

impl<E: 'static> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ListenerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<E> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

/// Keeps a listener installed; releases it on drop.
///
/// The guard holds only a weak reference to its registry, so it never keeps
/// the registry alive and may outlive it.
pub struct ListenerGuard {
    id: ListenerId,
    release: Option<Box<dyn FnOnce(ListenerId) + Send + Sync>>,
}

impl ListenerGuard {
    /// The id of the guarded listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Release the listener now.
    pub fn release(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

//! The document: per-window source of document-level events.
//!
//! Widgets receive their own input through direct calls (a button's
//! `click()`, a menu's `activate_item()`), but popups also need to observe
//! input aimed at *other* widgets: a press anywhere in the window may
//! dismiss them, and navigation keys must reach them wherever focus sits.
//! [`Document`] provides that hook as two [`ListenerRegistry`]s, one for
//! pointer presses and one for key presses.
//!
//! The host delivers each event to the targeted widget first and then to
//! the document, mirroring bubbling on the web platform:
//!
//! ```ignore
//! trigger.key_press(&mut event);
//! document.key_down(&mut event);
//! if !event.is_default_prevented() {
//!     // host default action (e.g. Tab focus traversal)
//! }
//! ```

use lattice_dropdown_core::logging::targets;
use lattice_dropdown_core::{ListenerGuard, ListenerRegistry};

use super::events::{KeyPressEvent, PointerPressEvent};

/// Document-level event hub. Cloning yields another handle to the same
/// document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pointer_down: ListenerRegistry<PointerPressEvent>,
    key_down: ListenerRegistry<KeyPressEvent>,
}

impl Document {
    /// Create a document with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for pointer presses anywhere in the document.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn on_pointer_down<F>(&self, listener: F) -> ListenerGuard
    where
        F: Fn(&mut PointerPressEvent) + Send + Sync + 'static,
    {
        self.pointer_down.listen(listener)
    }

    /// Listen for key presses anywhere in the document.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn on_key_down<F>(&self, listener: F) -> ListenerGuard
    where
        F: Fn(&mut KeyPressEvent) + Send + Sync + 'static,
    {
        self.key_down.listen(listener)
    }

    /// Deliver a pointer press to document listeners.
    pub fn pointer_down(&self, event: &mut PointerPressEvent) {
        let _span = tracing::trace_span!(target: targets::DOCUMENT, "pointer_down").entered();
        let delivered = self.pointer_down.dispatch(event);
        tracing::trace!(
            target: targets::DOCUMENT,
            x = event.pos.x,
            y = event.pos.y,
            delivered,
            "pointer press dispatched"
        );
    }

    /// Deliver a key press to document listeners.
    ///
    /// Returns `true` if a listener suppressed the default action.
    pub fn key_down(&self, event: &mut KeyPressEvent) -> bool {
        let _span = tracing::trace_span!(target: targets::DOCUMENT, "key_down").entered();
        let delivered = self.key_down.dispatch(event);
        tracing::trace!(
            target: targets::DOCUMENT,
            key = %event.key,
            delivered,
            prevented = event.is_default_prevented(),
            "key press dispatched"
        );
        event.is_default_prevented()
    }

    /// Total number of installed listeners (pointer and key).
    pub fn listener_count(&self) -> usize {
        self.pointer_down.listener_count() + self.key_down.listener_count()
    }
}

//! Trigger elements and the adapter that wires them to a dropdown.
//!
//! A dropdown does not draw its own trigger. The caller supplies any
//! element implementing [`Activatable`] (usually a [`TriggerButton`]) and
//! the dropdown wraps it in a [`TriggerAdapter`], which:
//!
//! - installs the activation handler (click, Enter, Space),
//! - publishes `has_popup = true` and the current `expanded` state,
//! - appends the directional indicator glyph after the element's content,
//! - returns focus to the element when the menu closes.
//!
//! The adapter never re-renders the element; it only talks to it through
//! the [`Activatable`] capability.

use std::fmt;
use std::sync::Arc;

use lattice_dropdown_core::logging::targets;
use lattice_dropdown_core::{ConnectionId, Signal};
use parking_lot::Mutex;

use crate::widget::accessibility::{Accessible, AccessibleNode, AccessibleRole};
use crate::widget::events::KeyPressEvent;
use crate::widget::geometry::Rect;

/// Callback invoked when an element is activated.
pub type ActivationHandler = Arc<dyn Fn() + Send + Sync>;

/// Capability of an element that can act as a dropdown trigger.
///
/// Implementations use interior mutability: the element is shared between
/// the caller, the host that delivers its input, and the dropdown.
pub trait Activatable: Send + Sync + 'static {
    /// Install a handler invoked on every activation.
    fn on_activate(&self, handler: ActivationHandler) -> ConnectionId;

    /// Remove a handler installed with [`on_activate`](Self::on_activate).
    fn remove_activation_handler(&self, id: ConnectionId);

    /// Publish the popup-related accessibility state.
    fn set_accessibility_state(&self, has_popup: bool, expanded: bool);

    /// Set (or clear) the indicator glyph shown after the content.
    fn set_indicator(&self, glyph: Option<char>);

    /// Give the element keyboard focus.
    fn focus(&self);

    /// Take keyboard focus away from the element.
    fn blur(&self);

    /// Whether the element has keyboard focus.
    fn has_focus(&self) -> bool;

    /// The element's bounds in window coordinates.
    fn geometry(&self) -> Rect;

    /// Snapshot of the element for the accessibility tree.
    fn accessible_node(&self) -> AccessibleNode;
}

#[derive(Debug, Default)]
struct ButtonState {
    focused: bool,
    has_popup: bool,
    expanded: bool,
    indicator: Option<char>,
    geometry: Rect,
}

/// A push button usable as a dropdown trigger.
///
/// # Signals
///
/// - [`clicked`](TriggerButton::clicked): emitted on click, Enter or Space
pub struct TriggerButton {
    label: String,
    state: Mutex<ButtonState>,

    /// Signal emitted when the button is activated.
    pub clicked: Signal<()>,
}

impl TriggerButton {
    /// Create a button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: Mutex::new(ButtonState::default()),
            clicked: Signal::new(),
        }
    }

    /// Set the button bounds using builder pattern.
    pub fn with_geometry(self, geometry: Rect) -> Self {
        self.set_geometry(geometry);
        self
    }

    /// The label supplied by the caller.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The rendered content: label followed by the indicator glyph, if any.
    pub fn display_text(&self) -> String {
        match self.state.lock().indicator {
            Some(glyph) => format!("{} {glyph}", self.label),
            None => self.label.clone(),
        }
    }

    /// Move the button.
    pub fn set_geometry(&self, geometry: Rect) {
        self.state.lock().geometry = geometry;
    }

    /// Whether `has_popup` is currently published.
    pub fn has_popup(&self) -> bool {
        self.state.lock().has_popup
    }

    /// The currently published `expanded` state.
    pub fn is_expanded(&self) -> bool {
        self.state.lock().expanded
    }

    /// Pointer click: focuses the button, then activates it.
    pub fn click(&self) {
        self.focus();
        tracing::trace!(target: targets::TRIGGER, label = %self.label, "trigger clicked");
        self.clicked.emit(());
    }

    /// Key press while the button is focused.
    ///
    /// Enter and Space activate the button and suppress the default action.
    /// Returns `true` if the key was handled.
    pub fn key_press(&self, event: &mut KeyPressEvent) -> bool {
        if !event.key.is_activation() || event.is_repeat {
            return false;
        }
        event.prevent_default();
        tracing::trace!(target: targets::TRIGGER, label = %self.label, key = %event.key, "trigger key activation");
        self.clicked.emit(());
        true
    }
}

impl Activatable for TriggerButton {
    fn on_activate(&self, handler: ActivationHandler) -> ConnectionId {
        self.clicked.connect(move |_| handler())
    }

    fn remove_activation_handler(&self, id: ConnectionId) {
        self.clicked.disconnect(id);
    }

    fn set_accessibility_state(&self, has_popup: bool, expanded: bool) {
        let mut state = self.state.lock();
        state.has_popup = has_popup;
        state.expanded = expanded;
    }

    fn set_indicator(&self, glyph: Option<char>) {
        self.state.lock().indicator = glyph;
    }

    fn focus(&self) {
        self.state.lock().focused = true;
    }

    fn blur(&self) {
        self.state.lock().focused = false;
    }

    fn has_focus(&self) -> bool {
        self.state.lock().focused
    }

    fn geometry(&self) -> Rect {
        self.state.lock().geometry
    }

    fn accessible_node(&self) -> AccessibleNode {
        let state = self.state.lock();
        AccessibleNode {
            role: AccessibleRole::Button,
            name: Some(self.label.clone()),
            has_popup: state.has_popup,
            expanded: state.has_popup.then_some(state.expanded),
            focusable: true,
            focused: state.focused,
            tab_index: Some(0),
            children: Vec::new(),
        }
    }
}

impl Accessible for TriggerButton {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn accessible_name(&self) -> Option<String> {
        Some(self.label.clone())
    }

    fn is_accessible_expanded(&self) -> Option<bool> {
        let state = self.state.lock();
        state.has_popup.then_some(state.expanded)
    }

    fn build_accessible_node(&self) -> AccessibleNode {
        self.accessible_node()
    }
}

impl fmt::Debug for TriggerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerButton")
            .field("label", &self.label)
            .field("state", &*self.state.lock())
            .finish()
    }
}

/// Wraps a caller-supplied [`Activatable`] for use by a dropdown.
///
/// Dropping the adapter removes the installed activation handler; the
/// element itself stays with the caller.
pub struct TriggerAdapter<T: Activatable> {
    element: Arc<T>,
    connection: ConnectionId,
}

impl<T: Activatable> TriggerAdapter<T> {
    /// Inject the handler, the initial collapsed state and the indicator.
    pub fn new(element: Arc<T>, indicator: char, handler: ActivationHandler) -> Self {
        element.set_indicator(Some(indicator));
        element.set_accessibility_state(true, false);
        let connection = element.on_activate(handler);
        tracing::debug!(target: targets::TRIGGER, %indicator, "trigger adapted");
        Self {
            element,
            connection,
        }
    }

    /// The wrapped element.
    pub fn element(&self) -> &Arc<T> {
        &self.element
    }

    /// Publish the expanded state (`has_popup` is always `true`).
    pub fn set_expanded(&self, expanded: bool) {
        self.element.set_accessibility_state(true, expanded);
    }

    /// Programmatically focus the element.
    pub fn focus(&self) {
        self.element.focus();
    }

    /// Take focus away from the element.
    pub fn blur(&self) {
        self.element.blur();
    }

    /// Whether the element has focus.
    pub fn has_focus(&self) -> bool {
        self.element.has_focus()
    }

    /// The element's bounds.
    pub fn geometry(&self) -> Rect {
        self.element.geometry()
    }
}

impl<T: Activatable> Drop for TriggerAdapter<T> {
    fn drop(&mut self) {
        self.element.remove_activation_handler(self.connection);
    }
}

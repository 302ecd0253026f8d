//! Dropdown menu controller.
//!
//! A [`DropdownMenu`] ties a caller-supplied trigger to a list of
//! [`MenuItem`]s. It owns the open/closed state, the keyboard focus among
//! its items, and the document listeners that dismiss it. Listeners exist
//! only while the menu is open.
//!
//! # Keyboard
//!
//! While open, key presses anywhere in the [`Document`] are handled:
//!
//! | Key | Effect |
//! |-----|--------|
//! | ArrowDown / ArrowUp | next / previous item, wrapping |
//! | Home / End | first / last item |
//! | Escape | close, focus the trigger |
//! | Tab on the last item | close, focus the trigger |
//! | Shift+Tab on the first item | close, focus the trigger |
//! | Enter / Space on an item | activate the item |
//!
//! # Signals
//!
//! - [`selected`](DropdownMenu::selected): emitted with the item value on activation
//! - [`open_changed`](DropdownMenu::open_changed): emitted on every open/close

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use lattice_dropdown_core::logging::{GestureKind, gesture_span, targets};
use lattice_dropdown_core::{ListenerGuard, Signal};
use parking_lot::Mutex;

use super::config::DropdownConfig;
use super::direction::Direction;
use super::menu_item::{MenuItem, validate_items};
use super::trigger::{Activatable, ActivationHandler, TriggerAdapter};
use crate::error::Result;
use crate::widget::accessibility::{Accessible, AccessibleNode, AccessibleRole};
use crate::widget::document::Document;
use crate::widget::events::{Key, KeyPressEvent, PointerPressEvent};
use crate::widget::geometry::{Point, Rect, Size};

/// Where keyboard focus goes when the menu closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusReturn {
    /// Back to the trigger.
    Trigger,
    /// To whatever element received the dismissing press.
    Elsewhere,
}

struct MenuState {
    items: Vec<MenuItem>,
    config: DropdownConfig,
    open: bool,
    focused_index: Option<usize>,
    listeners: Vec<ListenerGuard>,
}

impl MenuState {
    fn set_focused_index(&mut self, index: Option<usize>) {
        self.focused_index = index;
    }

    fn focus_next_from(&mut self, start: usize) {
        let count = self.items.len();
        if count > 0 {
            self.set_focused_index(Some(start % count));
        }
    }

    fn focus_previous_from(&mut self, start: usize) {
        let count = self.items.len();
        if count > 0 {
            self.set_focused_index(Some((start + count - 1) % count));
        }
    }

    fn focus_next(&mut self) {
        let start = self.focused_index.map(|i| i + 1).unwrap_or(0);
        self.focus_next_from(start);
    }

    fn focus_previous(&mut self) {
        let start = self.focused_index.unwrap_or(self.items.len());
        self.focus_previous_from(start);
    }

    fn focus_first(&mut self) {
        self.focus_next_from(0);
    }

    fn focus_last(&mut self) {
        self.focus_previous_from(self.items.len());
    }

    fn menu_rect(&self, anchor: Rect) -> Rect {
        let size = Size::new(
            anchor.width(),
            self.items.len() as f32 * self.config.item_height,
        );
        self.config.direction.place(anchor, size, self.config.gap)
    }

    fn item_rect(&self, anchor: Rect, index: usize) -> Option<Rect> {
        if index >= self.items.len() {
            return None;
        }
        let menu = self.menu_rect(anchor);
        let height = self.config.item_height;
        Some(Rect::new(
            menu.left(),
            menu.top() + index as f32 * height,
            menu.width(),
            height,
        ))
    }

    fn item_at(&self, anchor: Rect, pos: Point) -> Option<usize> {
        (0..self.items.len()).find(|&index| {
            self.item_rect(anchor, index)
                .is_some_and(|rect| rect.contains(pos))
        })
    }
}

/// State shared between the handle, the trigger handler and the document
/// listeners.
///
/// `trigger` lives outside the lock: [`Activatable`] is caller code and is
/// only invoked once the state guard has been released.
struct Shared<T: Activatable> {
    this: Weak<Shared<T>>,
    document: Document,
    trigger: TriggerAdapter<T>,
    state: Mutex<MenuState>,
    selected: Signal<String>,
    open_changed: Signal<bool>,
}

impl<T: Activatable> Shared<T> {
    // =========================================================================
    // Transitions
    // =========================================================================

    fn open(&self) -> bool {
        let focused = {
            let mut state = self.state.lock();
            if state.open {
                return false;
            }
            state.open = true;
            state.listeners = self.install_listeners();
            state.focused_index = None;
            state.focus_first();
            tracing::debug!(
                target: targets::DROPDOWN,
                items = state.items.len(),
                focused = ?state.focused_index,
                "menu opened"
            );
            state.focused_index
        };

        self.trigger.set_expanded(true);
        if focused.is_some() {
            self.trigger.blur();
        }
        self.open_changed.emit(true);
        true
    }

    fn close(&self, focus: FocusReturn) -> bool {
        let released = {
            let mut state = self.state.lock();
            if !state.open {
                return false;
            }
            state.open = false;
            state.focused_index = None;
            tracing::debug!(target: targets::DROPDOWN, ?focus, "menu closed");
            std::mem::take(&mut state.listeners)
        };
        // Registry locks are taken on release; keep them out of the state lock.
        drop(released);

        self.trigger.set_expanded(false);
        match focus {
            FocusReturn::Trigger => self.trigger.focus(),
            FocusReturn::Elsewhere => self.trigger.blur(),
        }
        self.open_changed.emit(false);
        true
    }

    fn toggle(&self) {
        let open = self.state.lock().open;
        if open {
            self.close(FocusReturn::Trigger);
        } else {
            self.open();
        }
    }

    fn activate_item(&self, index: usize) -> bool {
        let item = {
            let state = self.state.lock();
            if !state.open {
                return false;
            }
            match state.items.get(index) {
                Some(item) => item.clone(),
                None => return false,
            }
        };

        tracing::debug!(
            target: targets::DROPDOWN,
            index,
            value = item.value(),
            "item activated"
        );
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| item.activate()));
        self.selected.emit(item.value().to_string());
        self.close(FocusReturn::Trigger);

        if let Err(payload) = outcome {
            tracing::warn!(
                target: targets::DROPDOWN,
                value = item.value(),
                "item callback panicked after the menu was closed"
            );
            panic::resume_unwind(payload);
        }
        true
    }

    // =========================================================================
    // Document Listeners
    // =========================================================================

    fn install_listeners(&self) -> Vec<ListenerGuard> {
        let on_pointer = self.this.clone();
        let on_key = self.this.clone();
        vec![
            self.document.on_pointer_down(move |event| {
                if let Some(shared) = on_pointer.upgrade() {
                    shared.handle_pointer_down(event);
                }
            }),
            self.document.on_key_down(move |event| {
                if let Some(shared) = on_key.upgrade() {
                    shared.handle_key_down(event);
                }
            }),
        ]
    }

    fn handle_pointer_down(&self, event: &mut PointerPressEvent) {
        let anchor = self.trigger.geometry();
        let inside = {
            let state = self.state.lock();
            if !state.open {
                return;
            }
            anchor.contains(event.pos) || state.menu_rect(anchor).contains(event.pos)
        };
        if inside {
            return;
        }

        let _span = gesture_span(GestureKind::Pointer, "outside press").entered();
        let focus = if event.target_takes_focus {
            FocusReturn::Elsewhere
        } else {
            FocusReturn::Trigger
        };
        self.close(focus);
    }

    fn handle_key_down(&self, event: &mut KeyPressEvent) {
        // Already consumed by the focused element (e.g. Enter on the trigger).
        if event.is_default_prevented() {
            return;
        }

        let _span = gesture_span(GestureKind::Key, &event.key.to_string()).entered();
        let mut state = self.state.lock();
        if !state.open {
            return;
        }

        let count = state.items.len();
        match event.key {
            Key::ArrowDown => {
                event.prevent_default();
                state.focus_next();
            }
            Key::ArrowUp => {
                event.prevent_default();
                state.focus_previous();
            }
            Key::Home => {
                event.prevent_default();
                state.focus_first();
            }
            Key::End => {
                event.prevent_default();
                state.focus_last();
            }
            Key::Escape => {
                event.prevent_default();
                drop(state);
                self.close(FocusReturn::Trigger);
                return;
            }
            Key::Tab => {
                let at_boundary = if event.modifiers.shift {
                    state.focused_index == Some(0)
                } else {
                    state.focused_index == count.checked_sub(1)
                };
                if at_boundary {
                    // An empty menu holds no focus to keep; traversal proceeds.
                    if state.focused_index.is_some() {
                        event.prevent_default();
                    }
                    drop(state);
                    self.close(FocusReturn::Trigger);
                }
                return;
            }
            Key::Enter | Key::Space if !event.is_repeat => {
                if let Some(index) = state.focused_index {
                    event.prevent_default();
                    drop(state);
                    self.activate_item(index);
                }
                return;
            }
            _ => return,
        }

        let focused = state.focused_index;
        drop(state);
        tracing::trace!(target: targets::DROPDOWN, ?focused, "focus moved");
        if focused.is_some() {
            self.trigger.blur();
        }
    }
}

/// An accessible dropdown menu.
///
/// The menu is a handle over shared state; dropping it releases the
/// document listeners and the trigger's activation handler. The trigger
/// itself stays with the caller.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lattice_dropdown::prelude::*;
///
/// let document = Document::new();
/// let trigger = Arc::new(TriggerButton::new("Open Menu"));
/// let menu = DropdownMenu::new(
///     &document,
///     trigger.clone(),
///     vec![MenuItem::new("Profile", "profile"), MenuItem::new("Settings", "settings")],
///     DropdownConfig::default(),
/// );
///
/// trigger.click();
/// assert!(menu.is_open());
/// assert_eq!(menu.focused_index(), Some(0));
///
/// let mut down = KeyPressEvent::key(Key::ArrowDown);
/// document.key_down(&mut down);
/// assert_eq!(menu.focused_index(), Some(1));
/// ```
pub struct DropdownMenu<T: Activatable> {
    shared: Arc<Shared<T>>,
}

impl<T: Activatable> DropdownMenu<T> {
    /// Create a dropdown, wiring `trigger` to toggle it.
    ///
    /// Duplicate item values are tolerated but logged; use
    /// [`try_new`](Self::try_new) to reject them.
    pub fn new(
        document: &Document,
        trigger: Arc<T>,
        items: Vec<MenuItem>,
        config: DropdownConfig,
    ) -> Self {
        if let Err(err) = validate_items(&items) {
            tracing::warn!(target: targets::DROPDOWN, %err, "questionable menu items");
        }

        let shared = Arc::new_cyclic(|this: &Weak<Shared<T>>| {
            let weak = this.clone();
            let handler: ActivationHandler = Arc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    let _span = gesture_span(GestureKind::Pointer, "trigger").entered();
                    shared.toggle();
                }
            });
            let trigger = TriggerAdapter::new(trigger, config.indicator, handler);
            Shared {
                this: this.clone(),
                document: document.clone(),
                trigger,
                state: Mutex::new(MenuState {
                    items,
                    config,
                    open: false,
                    focused_index: None,
                    listeners: Vec::new(),
                }),
                selected: Signal::new(),
                open_changed: Signal::new(),
            }
        });

        Self { shared }
    }

    /// Create a dropdown after checking labels are non-empty and values
    /// unique.
    pub fn try_new(
        document: &Document,
        trigger: Arc<T>,
        items: Vec<MenuItem>,
        config: DropdownConfig,
    ) -> Result<Self> {
        validate_items(&items)?;
        Ok(Self::new(document, trigger, items, config))
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.shared.state.lock().open
    }

    /// Index of the item holding keyboard focus.
    pub fn focused_index(&self) -> Option<usize> {
        self.shared.state.lock().focused_index
    }

    /// The item holding keyboard focus.
    pub fn focused_item(&self) -> Option<MenuItem> {
        let state = self.shared.state.lock();
        state.focused_index.and_then(|i| state.items.get(i).cloned())
    }

    /// Snapshot of the items.
    pub fn items(&self) -> Vec<MenuItem> {
        self.shared.state.lock().items.clone()
    }

    /// Replace the items.
    ///
    /// If the menu is open, focus follows the focused item's value into the
    /// new list; it is cleared when that value is gone.
    pub fn set_items(&self, items: Vec<MenuItem>) {
        if let Err(err) = validate_items(&items) {
            tracing::warn!(target: targets::DROPDOWN, %err, "questionable menu items");
        }
        let mut state = self.shared.state.lock();
        let focused_value = state
            .focused_index
            .and_then(|i| state.items.get(i))
            .map(|item| item.value().to_string());
        state.items = items;
        state.focused_index =
            focused_value.and_then(|value| state.items.iter().position(|item| item.value() == value));
    }

    /// Side of the trigger the menu opens towards.
    pub fn direction(&self) -> Direction {
        self.shared.state.lock().config.direction
    }

    /// The active configuration.
    pub fn config(&self) -> DropdownConfig {
        self.shared.state.lock().config.clone()
    }

    /// The caller's trigger element.
    pub fn trigger(&self) -> Arc<T> {
        self.shared.trigger.element().clone()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Open the menu and focus the first item.
    ///
    /// Returns `false` if it was already open.
    pub fn open(&self) -> bool {
        let _span = gesture_span(GestureKind::Programmatic, "open").entered();
        self.shared.open()
    }

    /// Close the menu and return focus to the trigger.
    ///
    /// Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        let _span = gesture_span(GestureKind::Programmatic, "close").entered();
        self.shared.close(FocusReturn::Trigger)
    }

    /// Open if closed, close if open.
    pub fn toggle(&self) {
        let _span = gesture_span(GestureKind::Programmatic, "toggle").entered();
        self.shared.toggle();
    }

    /// Activate the item at `index`.
    ///
    /// Runs the item's callback, emits [`selected`](Self::selected), closes
    /// the menu and focuses the trigger, in that order. A panicking callback
    /// still gets the menu closed before the panic resumes.
    ///
    /// Returns `false` if the menu is closed or `index` is out of range.
    pub fn activate_item(&self, index: usize) -> bool {
        let _span = gesture_span(GestureKind::Pointer, "item").entered();
        self.shared.activate_item(index)
    }

    /// Pointer click at `pos`: activates the item under it, if any.
    pub fn click_at(&self, pos: Point) -> bool {
        match self.item_at(pos) {
            Some(index) => self.activate_item(index),
            None => false,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Index of the item under `pos` while the menu is open.
    pub fn item_at(&self, pos: Point) -> Option<usize> {
        let anchor = self.shared.trigger.geometry();
        let state = self.shared.state.lock();
        if !state.open {
            return None;
        }
        state.item_at(anchor, pos)
    }

    /// Bounds of the menu surface.
    pub fn menu_rect(&self) -> Rect {
        let anchor = self.shared.trigger.geometry();
        self.shared.state.lock().menu_rect(anchor)
    }

    /// Bounds of the item at `index`.
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        let anchor = self.shared.trigger.geometry();
        self.shared.state.lock().item_rect(anchor, index)
    }

    /// Class names for the menu surface: placement plus visibility.
    pub fn menu_class_names(&self) -> String {
        let state = self.shared.state.lock();
        let visibility = if state.open {
            "opacity-100 scale-100"
        } else {
            "opacity-0 scale-95 pointer-events-none"
        };
        format!(
            "dropdown-menu {} {visibility}",
            state.config.direction.position_classes().class_names()
        )
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal emitted with the value of each activated item.
    pub fn selected(&self) -> &Signal<String> {
        &self.shared.selected
    }

    /// Signal emitted with the new state on every open and close.
    pub fn open_changed(&self) -> &Signal<bool> {
        &self.shared.open_changed
    }

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// The accessibility tree: the trigger, followed by the menu when open.
    pub fn accessibility_tree(&self) -> AccessibleNode {
        self.build_accessible_node()
    }
}

impl<T: Activatable> Accessible for DropdownMenu<T> {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Container
    }

    fn is_accessible_expanded(&self) -> Option<bool> {
        Some(self.is_open())
    }

    fn build_accessible_node(&self) -> AccessibleNode {
        let trigger = self.shared.trigger.element().accessible_node();
        let state = self.shared.state.lock();
        let root = AccessibleNode::new(AccessibleRole::Container).with_child(trigger);
        if !state.open {
            return root;
        }

        let mut menu = AccessibleNode::new(AccessibleRole::Menu);
        menu.tab_index = Some(-1);
        for (index, item) in state.items.iter().enumerate() {
            let mut node = item.build_accessible_node();
            node.focusable = true;
            node.tab_index = Some(0);
            node.focused = state.focused_index == Some(index);
            menu.children.push(node);
        }
        root.with_child(menu)
    }
}

impl<T: Activatable> fmt::Debug for DropdownMenu<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("DropdownMenu")
            .field("open", &state.open)
            .field("focused_index", &state.focused_index)
            .field("items", &state.items)
            .field("direction", &state.config.direction)
            .finish()
    }
}

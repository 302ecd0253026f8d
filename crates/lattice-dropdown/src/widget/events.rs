//! Input event types.
//!
//! Events are delivered one at a time by the host. Each event carries an
//! [`EventBase`] that records whether a handler consumed it and whether the
//! host's default action (focus traversal for Tab, scrolling for arrow keys,
//! button activation for Space) should be suppressed.

use std::fmt;

use super::geometry::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Common data for all input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
    default_prevented: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Suppress the host's default action for this event.
    ///
    /// Implies [`accept`](Self::accept).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
        self.accepted = true;
    }

    /// Whether the host's default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Logical keys the widget layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab (Shift+Tab is Tab with the shift modifier).
    Tab,
    /// A printable character.
    Character(char),
}

impl Key {
    /// Parse a key from its web `KeyboardEvent.key` name.
    ///
    /// Returns `None` for names the widget layer does not handle.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Check if this key activates a focused button.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Character(c) => write!(f, "{c}"),
            Key::Space => f.write_str("Space"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Key press event.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            is_repeat: false,
        }
    }

    /// A key press without modifiers.
    pub fn key(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE)
    }

    /// A Shift+Tab press.
    pub fn backtab() -> Self {
        Self::new(Key::Tab, KeyboardModifiers::SHIFT)
    }

    /// Suppress the host's default action.
    pub fn prevent_default(&mut self) {
        self.base.prevent_default();
    }

    /// Whether the host's default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.base.is_default_prevented()
    }
}

/// Pointer press event (the "mousedown" of the web platform).
#[derive(Debug, Clone)]
pub struct PointerPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in window coordinates.
    pub pos: Point,
    /// Whether the element under the pointer takes keyboard focus itself
    /// (a text field, another button).
    pub target_takes_focus: bool,
}

impl PointerPressEvent {
    /// Create a press at `pos` on a non-focusable target.
    pub fn new(pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            pos,
            target_takes_focus: false,
        }
    }

    /// Mark the target under the pointer as focusable.
    pub fn on_focusable_target(mut self) -> Self {
        self.target_takes_focus = true;
        self
    }
}

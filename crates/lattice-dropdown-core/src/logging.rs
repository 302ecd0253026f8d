//! Logging facilities for Lattice Dropdown.
//!
//! All instrumentation goes through the `tracing` crate. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_dropdown=debug")
//!     .init();
//! ```
//!
//! Each subsystem logs under its own target (see [`targets`]) so that, for
//! example, keyboard navigation can be traced without signal noise.

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system.
    pub const SIGNAL: &str = "lattice_dropdown_core::signal";
    /// Listener registration and release.
    pub const LISTENER: &str = "lattice_dropdown_core::listener";
    /// Document event delivery.
    pub const DOCUMENT: &str = "lattice_dropdown::document";
    /// Dropdown state machine transitions.
    pub const DROPDOWN: &str = "lattice_dropdown::dropdown";
    /// Trigger adapter and trigger elements.
    pub const TRIGGER: &str = "lattice_dropdown::trigger";
    /// Configuration loading.
    pub const CONFIG: &str = "lattice_dropdown::config";
}

/// Kind of gesture recorded on a [`gesture_span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Pointer click or press.
    Pointer,
    /// Key press.
    Key,
    /// Programmatic call (no user input).
    Programmatic,
}

impl GestureKind {
    /// Short lowercase name, used as a span field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Key => "key",
            Self::Programmatic => "programmatic",
        }
    }
}

/// Open a debug span covering the handling of one gesture.
///
/// Everything logged while the returned span is entered is attributed to
/// the gesture, which makes interleaved dropdown instances easy to tell
/// apart.
pub fn gesture_span(kind: GestureKind, detail: &str) -> tracing::Span {
    tracing::debug_span!(
        target: targets::DROPDOWN,
        "gesture",
        kind = kind.as_str(),
        detail = detail
    )
}

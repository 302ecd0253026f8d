//! Core systems for Lattice Dropdown.
//!
//! This crate provides the pieces the dropdown widget layer is built on:
//!
//! - **Signal/Slot System**: [`Signal`] for notifying observers of
//!   selections and open/close changes
//! - **Scoped Listeners**: [`ListenerRegistry`] and [`ListenerGuard`] for
//!   document-level event hooks that are released deterministically
//! - **Logging**: `tracing` targets and gesture spans
//!
//! # Example
//!
//! ```
//! use lattice_dropdown_core::{ListenerRegistry, Signal};
//!
//! let presses = ListenerRegistry::<u32>::new();
//! let closed = Signal::<()>::new();
//! closed.connect(|_| println!("menu closed"));
//!
//! let guard = presses.listen(move |_| closed.emit(()));
//! presses.dispatch(&mut 7);
//! drop(guard);
//! ```

pub mod listener;
pub mod logging;
pub mod signal;

pub use listener::{ListenerGuard, ListenerId, ListenerRegistry};
pub use logging::{GestureKind, gesture_span};
pub use signal::{ConnectionId, Signal};

//! Widget layer: events, geometry, accessibility and the dropdown widgets.

pub mod accessibility;
mod document;
mod events;
mod geometry;
pub mod widgets;

pub use accessibility::{Accessible, AccessibleNode, AccessibleRole};
pub use document::Document;
pub use events::{EventBase, Key, KeyPressEvent, KeyboardModifiers, PointerPressEvent};
pub use geometry::{Point, Rect, Size};
pub use widgets::*;

#[cfg(test)]
mod tests;

//! Commonly used types.
//!
//! ```
//! use lattice_dropdown::prelude::*;
//! ```

pub use crate::error::{DropdownError, Result};
pub use crate::widget::{
    Accessible, AccessibleNode, AccessibleRole, Activatable, Direction, Document, DropdownConfig,
    DropdownMenu, Key, KeyPressEvent, KeyboardModifiers, MenuItem, Point, PointerPressEvent, Rect,
    Size, TriggerButton,
};
pub use lattice_dropdown_core::{ConnectionId, Signal};

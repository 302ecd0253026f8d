//! Dropdown widgets.
//!
//! - [`DropdownMenu`]: the menu controller
//! - [`MenuItem`]: one selectable entry
//! - [`TriggerButton`]: a push button usable as trigger
//! - [`TriggerAdapter`]: wires any [`Activatable`] to a dropdown

mod config;
mod direction;
mod dropdown;
mod menu_item;
mod trigger;

pub use config::{DEFAULT_GAP, DEFAULT_INDICATOR, DEFAULT_ITEM_HEIGHT, DropdownConfig};
pub use direction::{Direction, PositionClasses, Side};
pub use dropdown::DropdownMenu;
pub use menu_item::{ItemCallback, MenuItem, validate_items};
pub use trigger::{Activatable, ActivationHandler, TriggerAdapter, TriggerButton};

//! Accessibility support for dropdown widgets.
//!
//! Widgets describe themselves as [`AccessibleNode`] snapshots. The
//! snapshot is the contract assistive technology relies on: a dropdown's
//! trigger is a `button` with `has_popup` and an `expanded` state that
//! mirrors the menu exactly, and an open menu is a `menu` whose children
//! are all `menuitem`s.
//!
//! With the `accessibility` feature (on by default), snapshots convert to
//! [AccessKit](https://accesskit.dev/) nodes for platform bridges (UI
//! Automation, NSAccessibility, AT-SPI).
//!
//! ```
//! use lattice_dropdown::widget::{AccessibleNode, AccessibleRole};
//!
//! let menu = AccessibleNode::new(AccessibleRole::Menu)
//!     .with_child(AccessibleNode::new(AccessibleRole::MenuItem).with_name("Profile"));
//! assert!(menu.find_by_role_and_name(AccessibleRole::MenuItem, "profile").is_some());
//! ```

mod node;
mod role;

pub use node::{Accessible, AccessibleNode};
pub use role::AccessibleRole;

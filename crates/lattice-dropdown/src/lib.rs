//! Lattice Dropdown - an accessible dropdown menu widget.
//!
//! A [`DropdownMenu`](widget::DropdownMenu) pairs a caller-supplied trigger
//! with a list of items. It handles pointer and keyboard interaction,
//! publishes the `button`/`menu`/`menuitem` accessibility contract, and
//! dismisses itself on outside presses.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_dropdown::prelude::*;
//!
//! let document = Document::new();
//! let trigger = Arc::new(TriggerButton::new("Open Menu"));
//! let menu = DropdownMenu::new(
//!     &document,
//!     trigger.clone(),
//!     vec![MenuItem::new("Profile", "profile")],
//!     DropdownConfig::default().with_direction(Direction::Up),
//! );
//! menu.selected().connect(|value| println!("selected {value}"));
//!
//! trigger.click();
//! assert!(trigger.is_expanded());
//!
//! let mut enter = KeyPressEvent::key(Key::Enter);
//! document.key_down(&mut enter);
//! assert!(!menu.is_open());
//! assert!(trigger.has_focus());
//! ```

pub use lattice_dropdown_core::*;

pub mod error;
pub mod prelude;
pub mod widget;

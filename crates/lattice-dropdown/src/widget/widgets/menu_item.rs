//! Dropdown menu items.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{DropdownError, Result};
use crate::widget::accessibility::{Accessible, AccessibleRole};

/// Callback run when an item is activated.
pub type ItemCallback = Arc<dyn Fn() + Send + Sync>;

/// One selectable entry of a dropdown menu.
///
/// Items are immutable once built and cheap to clone. The `value` is the
/// item's identity: it is what the menu reports on selection and what keeps
/// keyboard focus on the same entry when the item list is replaced.
#[derive(Clone)]
pub struct MenuItem {
    label: String,
    value: String,
    callback: Option<ItemCallback>,
}

impl MenuItem {
    /// Create an item without a callback.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            callback: None,
        }
    }

    /// Attach a callback using builder pattern.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Opaque identifier reported on selection.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the item carries a callback.
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Run the item's callback, if any.
    pub fn activate(&self) {
        if let Some(callback) = &self.callback {
            callback();
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("value", &self.value)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl Accessible for MenuItem {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::MenuItem
    }

    fn accessible_name(&self) -> Option<String> {
        Some(self.label.clone())
    }
}

/// Check labels are non-empty and values unique.
pub fn validate_items(items: &[MenuItem]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.label.trim().is_empty() {
            return Err(DropdownError::EmptyLabel { index });
        }
        if !seen.insert(item.value.as_str()) {
            return Err(DropdownError::DuplicateValue {
                value: item.value.clone(),
            });
        }
    }
    Ok(())
}

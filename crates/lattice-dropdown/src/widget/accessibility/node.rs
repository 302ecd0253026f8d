//! Accessibility tree snapshots.
//!
//! An [`AccessibleNode`] is an immutable snapshot of what assistive
//! technology sees for one part of a widget: role, name and the few states
//! a dropdown exposes. Widgets build a fresh snapshot on request; the
//! snapshot never aliases live widget state.

use super::role::AccessibleRole;

/// One node of an accessibility tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessibleNode {
    /// The node's role.
    pub role: AccessibleRole,
    /// Accessible name (announced label).
    pub name: Option<String>,
    /// Whether activating the node opens a menu popup.
    pub has_popup: bool,
    /// Expanded state for nodes that control a popup; `None` otherwise.
    pub expanded: Option<bool>,
    /// Whether the node can take keyboard focus.
    pub focusable: bool,
    /// Whether the node currently has keyboard focus.
    pub focused: bool,
    /// Position in sequential focus order: `Some(0)` tabbable, `Some(-1)`
    /// programmatically focusable only, `None` unspecified.
    pub tab_index: Option<i32>,
    /// Child nodes in document order.
    pub children: Vec<AccessibleNode>,
}

impl AccessibleNode {
    /// Create a node with the given role and no other properties.
    pub fn new(role: AccessibleRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Set the accessible name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: AccessibleNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first pre-order iteration over this node and its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &AccessibleNode> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// All nodes (this one included) with the given role.
    pub fn find_all_by_role(&self, role: AccessibleRole) -> Vec<&AccessibleNode> {
        self.descendants().filter(|node| node.role == role).collect()
    }

    /// The first node with the given role.
    pub fn find_by_role(&self, role: AccessibleRole) -> Option<&AccessibleNode> {
        self.descendants().find(|node| node.role == role)
    }

    /// The first node with the given role whose name contains `name`,
    /// compared case-insensitively.
    pub fn find_by_role_and_name(
        &self,
        role: AccessibleRole,
        name: &str,
    ) -> Option<&AccessibleNode> {
        let needle = name.to_lowercase();
        self.descendants().find(|node| {
            node.role == role
                && node
                    .name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
    }

    /// Flatten into AccessKit nodes, assigning ids sequentially from
    /// `first_id` in pre-order. The first entry is this node.
    #[cfg(feature = "accessibility")]
    pub fn to_accesskit(&self, first_id: u64) -> Vec<(accesskit::NodeId, accesskit::Node)> {
        let mut out = Vec::new();
        let mut next_id = first_id;
        self.push_accesskit(&mut next_id, &mut out);
        out
    }

    #[cfg(feature = "accessibility")]
    fn push_accesskit(
        &self,
        next_id: &mut u64,
        out: &mut Vec<(accesskit::NodeId, accesskit::Node)>,
    ) -> accesskit::NodeId {
        let id = accesskit::NodeId(*next_id);
        *next_id += 1;

        let slot = out.len();
        out.push((id, accesskit::Node::new(self.role.to_accesskit_role())));

        let child_ids: Vec<_> = self
            .children
            .iter()
            .map(|child| child.push_accesskit(next_id, out))
            .collect();

        let node = &mut out[slot].1;
        if let Some(name) = &self.name {
            node.set_label(name.clone());
        }
        if self.has_popup {
            node.set_has_popup(accesskit::HasPopup::Menu);
        }
        if let Some(expanded) = self.expanded {
            node.set_expanded(expanded);
        }
        if self.focusable {
            node.add_action(accesskit::Action::Focus);
        }
        if matches!(self.role, AccessibleRole::Button | AccessibleRole::MenuItem) {
            node.add_action(accesskit::Action::Click);
        }
        if !child_ids.is_empty() {
            node.set_children(child_ids);
        }

        id
    }
}

/// Trait for widgets that expose accessibility information.
pub trait Accessible {
    /// The node's role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Container
    }

    /// The accessible name, if any.
    fn accessible_name(&self) -> Option<String> {
        None
    }

    /// Expanded state for popup controllers.
    fn is_accessible_expanded(&self) -> Option<bool> {
        None
    }

    /// Build a snapshot of this widget (and its children).
    fn build_accessible_node(&self) -> AccessibleNode {
        AccessibleNode {
            role: self.accessible_role(),
            name: self.accessible_name(),
            expanded: self.is_accessible_expanded(),
            ..AccessibleNode::default()
        }
    }
}

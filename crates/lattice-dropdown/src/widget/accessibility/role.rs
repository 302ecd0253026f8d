//! Accessibility roles for dropdown parts.

/// The accessibility role of a node.
///
/// Only the roles a dropdown exposes are listed. With the `accessibility`
/// feature they map onto AccessKit's `Role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum AccessibleRole {
    /// A generic container with no semantics of its own.
    #[default]
    Container,

    /// A push button.
    Button,

    /// A menu (popup list of commands).
    Menu,

    /// A command within a menu.
    MenuItem,
}

impl AccessibleRole {
    /// The WAI-ARIA role name.
    pub fn aria_name(self) -> &'static str {
        match self {
            AccessibleRole::Container => "generic",
            AccessibleRole::Button => "button",
            AccessibleRole::Menu => "menu",
            AccessibleRole::MenuItem => "menuitem",
        }
    }

    /// Convert to AccessKit's Role enum.
    #[cfg(feature = "accessibility")]
    pub fn to_accesskit_role(self) -> accesskit::Role {
        use accesskit::Role;

        match self {
            AccessibleRole::Container => Role::GenericContainer,
            AccessibleRole::Button => Role::Button,
            AccessibleRole::Menu => Role::Menu,
            AccessibleRole::MenuItem => Role::MenuItem,
        }
    }
}

#[cfg(feature = "accessibility")]
impl From<AccessibleRole> for accesskit::Role {
    fn from(role: AccessibleRole) -> Self {
        role.to_accesskit_role()
    }
}

impl std::fmt::Display for AccessibleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.aria_name())
    }
}

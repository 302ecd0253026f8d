//! Menu placement relative to the trigger.
//!
//! [`Direction`] says on which side of the trigger the menu opens. It maps
//! deterministically to a pair of layout classes (which edge of the menu is
//! pinned to the trigger, and on which side the gap sits) and to a concrete
//! rectangle for hit testing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DropdownError;
use crate::widget::geometry::{Rect, Size};

/// Side of the trigger the menu opens towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Above the trigger.
    Up,
    /// Below the trigger.
    #[default]
    Down,
    /// To the left of the trigger.
    Left,
    /// To the right of the trigger.
    Right,
}

/// A box edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    fn initial(self) -> char {
        match self {
            Side::Top => 't',
            Side::Bottom => 'b',
            Side::Left => 'l',
            Side::Right => 'r',
        }
    }
}

/// The layout class pair for a [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionClasses {
    /// Menu edge pinned flush against the opposite trigger edge.
    pub offset: Side,
    /// Side carrying the gap between trigger and menu.
    pub margin: Side,
}

impl PositionClasses {
    /// Utility class for the offset (e.g. `top-full`).
    pub fn offset_class(&self) -> String {
        format!("{}-full", self.offset.name())
    }

    /// Utility class for the margin (e.g. `mt-2`).
    pub fn margin_class(&self) -> String {
        format!("m{}-2", self.margin.initial())
    }

    /// Both classes, space separated.
    pub fn class_names(&self) -> String {
        format!("{} {}", self.offset_class(), self.margin_class())
    }
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// The layout classes for this direction.
    pub fn position_classes(self) -> PositionClasses {
        let side = match self {
            Direction::Up => Side::Bottom,
            Direction::Down => Side::Top,
            Direction::Left => Side::Right,
            Direction::Right => Side::Left,
        };
        PositionClasses {
            offset: side,
            margin: side,
        }
    }

    /// Place a menu of `size` next to `anchor`, `gap` pixels away.
    pub fn place(self, anchor: Rect, size: Size, gap: f32) -> Rect {
        let (x, y) = match self {
            Direction::Down => (anchor.left(), anchor.bottom() + gap),
            Direction::Up => (anchor.left(), anchor.top() - gap - size.height),
            Direction::Left => (anchor.left() - gap - size.width, anchor.top()),
            Direction::Right => (anchor.right() + gap, anchor.top()),
        };
        Rect::new(x, y, size.width, size.height)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DropdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DropdownError::UnknownDirection(s.to_string()))
    }
}

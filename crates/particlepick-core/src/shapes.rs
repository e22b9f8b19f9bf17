//! Annotation shape kinds drawn around each particle.

use serde::{Deserialize, Serialize};

/// A shape the GUI can draw around a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Square box of the family size
    Rectangle,
    /// Circle inscribed in the family box
    Circle,
    /// Cross marking the particle centre
    Center,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Center];
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rectangle => write!(f, "Rectangle"),
            Self::Circle => write!(f, "Circle"),
            Self::Center => write!(f, "Center"),
        }
    }
}

/// Which shape kinds are currently shown. Kinds missing from a serialized
/// set default to shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSet {
    pub rectangle: bool,
    pub circle: bool,
    pub center: bool,
}

impl ShapeSet {
    pub fn all() -> Self {
        Self::uniform(true)
    }

    pub fn none() -> Self {
        Self::uniform(false)
    }

    pub fn uniform(selected: bool) -> Self {
        Self {
            rectangle: selected,
            circle: selected,
            center: selected,
        }
    }

    pub fn contains(&self, kind: ShapeKind) -> bool {
        match kind {
            ShapeKind::Rectangle => self.rectangle,
            ShapeKind::Circle => self.circle,
            ShapeKind::Center => self.center,
        }
    }

    pub fn set(&mut self, kind: ShapeKind, selected: bool) {
        match kind {
            ShapeKind::Rectangle => self.rectangle = selected,
            ShapeKind::Circle => self.circle = selected,
            ShapeKind::Center => self.center = selected,
        }
    }

    pub fn is_all(&self) -> bool {
        self.rectangle && self.circle && self.center
    }

    pub fn is_empty(&self) -> bool {
        !(self.rectangle || self.circle || self.center)
    }

    /// Selected kinds in declaration order.
    pub fn kinds(&self) -> Vec<ShapeKind> {
        ShapeKind::ALL
            .into_iter()
            .filter(|k| self.contains(*k))
            .collect()
    }
}

impl Default for ShapeSet {
    fn default() -> Self {
        Self::all()
    }
}

//! Core types for diagram representation.

use std::fmt;

use serde::Serialize;

/// A unique identifier for a node in the diagram.
///
/// Ids follow the pre-order traversal of the expression, so the root is
/// always `n0` and every operand has a larger id than its gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node (always index 0).
    pub const ROOT: NodeId = NodeId(0);

    /// Index into the graph's node arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Tri-state logic value carried by nodes and wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    #[serde(rename = "false")]
    Low,
    #[serde(rename = "true")]
    High,
    /// Depends on a variable that has no value yet
    #[serde(rename = "unknown")]
    Unknown,
}

impl Signal {
    /// The boolean value, if known.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Self::Low => Some(false),
            Self::High => Some(true),
            Self::Unknown => None,
        }
    }

    /// Whether the value is known.
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Logical complement; unknown stays unknown.
    pub fn invert(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
            Self::Unknown => Self::Unknown,
        }
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "0"),
            Self::High => write!(f, "1"),
            Self::Unknown => write!(f, "?"),
        }
    }
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_invert() {
        assert_eq!(Signal::High.invert(), Signal::Low);
        assert_eq!(Signal::Low.invert(), Signal::High);
        assert_eq!(Signal::Unknown.invert(), Signal::Unknown);
    }

    #[test]
    fn test_signal_conversions() {
        assert_eq!(Signal::from(true), Signal::High);
        assert_eq!(Signal::Low.to_bool(), Some(false));
        assert_eq!(Signal::Unknown.to_bool(), None);
        assert!(!Signal::Unknown.is_known());
        assert_eq!(Signal::Unknown.to_string(), "?");
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(3).to_string(), "n3");
        assert_eq!(NodeId::ROOT.index(), 0);
    }
}

//! Diagram graph representation and validation.
//!
//! This module provides the representation of a compiled expression after
//! layout. The [`Graph`] struct is an arena of positioned nodes plus the
//! wires between them; nodes and edges refer to each other by [`NodeId`]
//! only.

mod graph;
mod types;
mod validate;

pub use graph::{Edge, Graph, GraphNode, NodeKind};
pub use types::*;
pub use validate::validate_graph;

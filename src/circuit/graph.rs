//! Diagram graph structure.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{NodeId, Point, Signal};
use crate::dsl::{Expr, GateKind};

/// What a node computes, with the ids of the nodes feeding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum NodeKind {
    /// Input variable
    Var { name: char },
    /// Inverter
    Not { input: NodeId },
    /// Conjunction gate
    And { inputs: Vec<NodeId> },
    /// Disjunction gate
    Or { inputs: Vec<NodeId> },
}

impl NodeKind {
    /// The gate kind this node is drawn as.
    pub fn gate(&self) -> GateKind {
        match self {
            Self::Var { .. } => GateKind::Var,
            Self::Not { .. } => GateKind::Not,
            Self::And { .. } => GateKind::And,
            Self::Or { .. } => GateKind::Or,
        }
    }

    /// Ids of the nodes feeding this one, in operand order.
    pub fn inputs(&self) -> &[NodeId] {
        match self {
            Self::Var { .. } => &[],
            Self::Not { input } => std::slice::from_ref(input),
            Self::And { inputs } | Self::Or { inputs } => inputs,
        }
    }
}

/// A positioned node in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Variable name or gate key
    pub label: String,
    /// Longest path to a variable leaf (leaves are level 0)
    pub level: usize,
    /// Variable leaves reachable under this node
    pub fan_in: usize,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    /// Filled in by evaluation
    pub signal: Option<Signal>,
}

impl GraphNode {
    /// Vertical centre.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// A wire from an operand to one input pin of its gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Position of `from` among the gate's operands
    pub slot: usize,
    /// Operand count of the gate
    pub slot_total: usize,
    /// Signal of `from`, filled in by evaluation
    pub value: Option<Signal>,
}

/// A laid-out diagram ready for rendering and evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    /// Node arena, indexed by [`NodeId`]
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    pub root: NodeId,
    /// Expression the diagram was laid out from
    #[serde(skip)]
    ast: Expr,
    /// Child to parent index
    #[serde(skip)]
    parents: Vec<Vec<NodeId>>,
    /// Gate and operand slot each node feeds; `None` for the root
    #[serde(skip)]
    operand_of: Vec<Option<(NodeId, usize)>>,
}

impl Graph {
    /// Assemble a graph from placed nodes. Builds the parent index.
    pub(crate) fn from_parts(
        ast: Expr,
        nodes: Vec<GraphNode>,
        edges: Vec<Edge>,
        width: f64,
        height: f64,
    ) -> Self {
        let mut parents = vec![Vec::new(); nodes.len()];
        let mut operand_of = vec![None; nodes.len()];
        for edge in &edges {
            parents[edge.from.index()].push(edge.to);
            operand_of[edge.from.index()] = Some((edge.to, edge.slot));
        }
        Self {
            nodes,
            edges,
            width,
            height,
            root: NodeId::ROOT,
            ast,
            parents,
            operand_of,
        }
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// Get a node by id, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.get_mut(id.index())
    }

    /// The output node.
    pub fn root_node(&self) -> Option<&GraphNode> {
        self.node(self.root)
    }

    /// Signal at the output node, once evaluated.
    pub fn output(&self) -> Option<Signal> {
        self.root_node().and_then(|n| n.signal)
    }

    /// The expression this diagram represents.
    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    /// The sub-expression a node was built from.
    ///
    /// Follows operand slots from the node up to the root, then walks the
    /// same slots down the stored expression.
    pub fn expr(&self, id: NodeId) -> Option<&Expr> {
        self.node(id)?;
        let mut slots = Vec::new();
        let mut current = id;
        while let Some(&Some((gate, slot))) = self.operand_of.get(current.index()) {
            slots.push(slot);
            current = gate;
        }
        slots
            .iter()
            .rev()
            .try_fold(&self.ast, |expr, &slot| expr.children().get(slot))
    }

    /// Gates fed by this node.
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.parents.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Node ids grouped by level, each group in id order.
    pub fn levels(&self) -> BTreeMap<usize, Vec<NodeId>> {
        let mut levels: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for node in &self.nodes {
            levels.entry(node.level).or_default().push(node.id);
        }
        levels
    }

    /// Highest level in the diagram (the root's level).
    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    /// Every leaf node for a variable name.
    pub fn variable_nodes(&self, name: char) -> Vec<NodeId> {
        let name = name.to_ascii_uppercase();
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Var { name })
            .map(|n| n.id)
            .collect()
    }

    /// Whether a variable appears in the diagram.
    pub fn has_variable(&self, name: char) -> bool {
        !self.variable_nodes(name).is_empty()
    }

    /// Where a node's output wire leaves it: the middle of its right face.
    pub fn output_anchor(&self, id: NodeId) -> Option<Point> {
        self.node(id).map(|n| Point::new(n.right(), n.center_y()))
    }

    /// Where a wire enters its gate. Pins are spread evenly down the left face.
    pub fn input_anchor(&self, edge: &Edge) -> Option<Point> {
        let to = self.node(edge.to)?;
        let fraction = (edge.slot + 1) as f64 / (edge.slot_total + 1) as f64;
        Some(Point::new(to.x, to.y + to.height * fraction))
    }

    /// Encode the graph as JSON for a renderer.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;
    use crate::layout::layout;

    #[test]
    fn test_levels_and_max_level() {
        let graph = layout(&parse("A.B + !C").unwrap());
        let levels = graph.levels();
        assert_eq!(levels[&0], vec![NodeId(2), NodeId(3), NodeId(5)]);
        assert_eq!(levels[&1], vec![NodeId(1), NodeId(4)]);
        assert_eq!(graph.max_level(), 2);
        assert_eq!(graph.root_node().map(|n| n.level), Some(2));
    }

    #[test]
    fn test_variable_lookup() {
        let graph = layout(&parse("A + a.B").unwrap());
        assert_eq!(graph.variable_nodes('A'), vec![NodeId(1), NodeId(3)]);
        assert!(graph.has_variable('b'));
        assert!(!graph.has_variable('C'));
    }

    #[test]
    fn test_expr_matches_pre_order() {
        let ast = parse("(A + !B).!(C.D.!E) + F").unwrap();
        let graph = layout(&ast);
        for (index, expected) in ast.pre_order().into_iter().enumerate() {
            assert_eq!(graph.expr(NodeId(index)), Some(expected));
        }
        assert_eq!(graph.expr(NodeId(graph.nodes.len())), None);
    }

    #[test]
    fn test_output_reads_root_signal() {
        let mut graph = layout(&parse("!A").unwrap());
        assert_eq!(graph.output(), None);
        if let Some(root) = graph.node_mut(NodeId::ROOT) {
            root.signal = Some(Signal::High);
        }
        assert_eq!(graph.output(), Some(Signal::High));
        assert!(graph.node(NodeId(2)).is_none());
    }
}

//! Diagram layout engine.
//!
//! This module turns an expression tree into a positioned [`Graph`].
//!
//! ## Layout Method
//!
//! 1. Number nodes in pre-order and record each gate's operand ids
//! 2. Compute level (longest path to a leaf) and fan-in (leaf count) for
//!    every node in one post-order pass, then size each node from them
//! 3. Place levels in columns left to right, stacking each column with a
//!    gap that widens with the column's largest fan-in
//! 4. Walking up from level 1, centre every gate on its operands and push
//!    apart any nodes on that level closer than the minimum separation
//! 5. Shift the drawing to the top margin and size the canvas around it
//!
//! Wires record which input pin of their gate they land on, so renderers
//! can spread several wires down one gate face.

mod metrics;
mod placement;

pub use metrics::{compute_metrics, NodeMetrics};

use tracing::debug;

use crate::circuit::{Edge, Graph, GraphNode, NodeId, NodeKind};
use crate::dsl::Expr;

/// Default node width.
pub const BASE_WIDTH: f64 = 50.0;

/// Default node height.
pub const BASE_HEIGHT: f64 = 40.0;

/// Smallest canvas produced, as (width, height).
pub const MIN_CANVAS: (f64, f64) = (360.0, 220.0);

/// Configuration for the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Node size before any scaling.
    pub base_width: f64,
    pub base_height: f64,
    /// AND/OR growth per fan-in above two.
    pub gate_width_per_input: f64,
    pub gate_height_per_input: f64,
    /// NOT growth per leaf above one.
    pub not_width_per_leaf: f64,
    pub not_height_per_leaf: f64,
    /// Extra leaves beyond which a NOT stops growing.
    pub not_growth_cap: usize,
    /// Growth per level for every node.
    pub width_per_level: f64,
    pub height_per_level: f64,
    /// Horizontal space between columns.
    pub column_gap: f64,
    /// Vertical space between stacked nodes.
    pub row_gap: f64,
    /// Row gap growth per fan-in above two, using the column's largest fan-in.
    pub row_gap_per_input: f64,
    /// Fraction of the row gap two nodes on one level must always keep.
    pub min_separation_ratio: f64,
    /// Canvas margin.
    pub margin_x: f64,
    pub margin_y: f64,
    /// Smallest canvas.
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            base_height: BASE_HEIGHT,
            gate_width_per_input: 6.0,
            gate_height_per_input: 10.0,
            not_width_per_leaf: 4.0,
            not_height_per_leaf: 3.0,
            not_growth_cap: 3,
            width_per_level: 4.0,
            height_per_level: 2.0,
            column_gap: 70.0,
            row_gap: 30.0,
            row_gap_per_input: 8.0,
            min_separation_ratio: 0.5,
            margin_x: 40.0,
            margin_y: 30.0,
            min_width: MIN_CANVAS.0,
            min_height: MIN_CANVAS.1,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base node size.
    pub fn with_base_size(mut self, width: f64, height: f64) -> Self {
        self.base_width = width;
        self.base_height = height;
        self
    }

    /// Set the horizontal gap between columns. Negative gaps become zero.
    pub fn with_column_gap(mut self, gap: f64) -> Self {
        self.column_gap = gap.max(0.0);
        self
    }

    /// Set the base vertical gap between nodes in a column. Negative gaps become zero.
    pub fn with_row_gap(mut self, gap: f64) -> Self {
        self.row_gap = gap.max(0.0);
        self
    }

    /// Set the fraction of the row gap kept between nodes after centering.
    ///
    /// Clamped to `0.0..=1.0`.
    pub fn with_min_separation_ratio(mut self, ratio: f64) -> Self {
        self.min_separation_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Set the canvas margin.
    pub fn with_margin(mut self, x: f64, y: f64) -> Self {
        self.margin_x = x;
        self.margin_y = y;
        self
    }

    /// Row gap for a column whose largest fan-in is `max_fan_in`.
    pub fn row_gap_for(&self, max_fan_in: usize) -> f64 {
        self.row_gap + max_fan_in.saturating_sub(2) as f64 * self.row_gap_per_input
    }

    /// Minimum distance between vertically adjacent nodes in such a column.
    pub fn min_separation(&self, max_fan_in: usize) -> f64 {
        self.row_gap_for(max_fan_in) * self.min_separation_ratio
    }
}

/// Lay out an expression with the default configuration.
pub fn layout(ast: &Expr) -> Graph {
    layout_with_config(ast, &LayoutConfig::default())
}

/// Lay out an expression.
///
/// The result depends only on the shape of `ast` and on `config`.
pub fn layout_with_config(ast: &Expr, config: &LayoutConfig) -> Graph {
    let mut nodes = number_nodes(ast);

    let kinds: Vec<NodeKind> = nodes.iter().map(|n: &GraphNode| n.kind.clone()).collect();
    let metrics = compute_metrics(&kinds, config);
    for (node, m) in nodes.iter_mut().zip(&metrics) {
        node.level = m.level;
        node.fan_in = m.fan_in;
        node.width = m.width;
        node.height = m.height;
    }

    let (width, height) = placement::place(&mut nodes, config);
    let edges = build_edges(&nodes);

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        width,
        height,
        "laid out diagram"
    );

    Graph::from_parts(ast.clone(), nodes, edges, width, height)
}

/// Assign ids in pre-order and record each gate's operand ids.
fn number_nodes(ast: &Expr) -> Vec<GraphNode> {
    let mut order: Vec<&Expr> = Vec::new();
    let mut inputs: Vec<Vec<NodeId>> = Vec::new();
    let mut stack: Vec<(&Expr, Option<NodeId>)> = vec![(ast, None)];

    // Operands are pushed reversed, so each gate collects them in source order.
    while let Some((expr, parent)) = stack.pop() {
        let id = NodeId(order.len());
        if let Some(parent) = parent {
            inputs[parent.index()].push(id);
        }
        order.push(expr);
        inputs.push(Vec::new());
        stack.extend(expr.children().iter().rev().map(|child| (child, Some(id))));
    }

    order
        .into_iter()
        .zip(inputs)
        .enumerate()
        .map(|(index, (expr, inputs))| {
            let (kind, label) = match expr {
                Expr::Var(name) => (NodeKind::Var { name: *name }, name.to_string()),
                Expr::Not(_) => (NodeKind::Not { input: inputs[0] }, expr.kind().to_string()),
                Expr::And(_) => (NodeKind::And { inputs }, expr.kind().to_string()),
                Expr::Or(_) => (NodeKind::Or { inputs }, expr.kind().to_string()),
            };
            GraphNode {
                id: NodeId(index),
                kind,
                label,
                level: 0,
                fan_in: 0,
                width: 0.0,
                height: 0.0,
                x: 0.0,
                y: 0.0,
                signal: None,
            }
        })
        .collect()
}

fn build_edges(nodes: &[GraphNode]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for node in nodes {
        let inputs = node.kind.inputs();
        for (slot, &from) in inputs.iter().enumerate() {
            edges.push(Edge {
                from,
                to: node.id,
                slot,
                slot_total: inputs.len(),
                value: None,
            });
        }
    }
    edges
}

//! Layout validation.

use crate::error::{DiagramError, Result};
use crate::layout::LayoutConfig;

use super::Graph;

/// Slack for floating-point comparisons, in canvas units.
const EPSILON: f64 = 1e-6;

/// Validate a laid-out graph.
///
/// Checks:
/// - Every wire runs from a lower level to a strictly higher one
/// - Nodes sharing a level are separated by at least the minimum gap
/// - Every node lies inside the canvas
pub fn validate_graph(graph: &Graph, config: &LayoutConfig) -> Result<()> {
    if graph.nodes.is_empty() {
        return Err(invalid("graph has no nodes"));
    }

    for edge in &graph.edges {
        let (Some(from), Some(to)) = (graph.node(edge.from), graph.node(edge.to)) else {
            return Err(invalid(format!(
                "edge {} -> {} references a missing node",
                edge.from, edge.to
            )));
        };
        if from.level >= to.level {
            return Err(invalid(format!(
                "edge {} -> {} does not rise in level ({} -> {})",
                edge.from, edge.to, from.level, to.level
            )));
        }
    }

    for (level, ids) in graph.levels() {
        let mut column: Vec<_> = ids.iter().filter_map(|&id| graph.node(id)).collect();
        column.sort_by(|a, b| a.y.total_cmp(&b.y));
        let max_fan_in = column.iter().map(|n| n.fan_in).max().unwrap_or(0);
        let min_gap = config.min_separation(max_fan_in);

        for pair in column.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if lower.y + EPSILON < upper.bottom() + min_gap {
                return Err(invalid(format!(
                    "nodes {} and {} on level {} are closer than {:.1}",
                    upper.id, lower.id, level, min_gap
                )));
            }
        }
    }

    for node in &graph.nodes {
        if node.x < -EPSILON
            || node.y < -EPSILON
            || node.right() > graph.width + EPSILON
            || node.bottom() > graph.height + EPSILON
        {
            return Err(invalid(format!("node {} lies outside the canvas", node.id)));
        }
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> DiagramError {
    DiagramError::InvalidLayout {
        message: message.into(),
    }
}

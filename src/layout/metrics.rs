//! Per-node level, fan-in and size.

use crate::circuit::NodeKind;

use super::LayoutConfig;

/// Side-table entry for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMetrics {
    pub level: usize,
    /// Variable leaves reachable under the node
    pub fan_in: usize,
    pub width: f64,
    pub height: f64,
}

/// Compute metrics for pre-order numbered nodes.
///
/// Operands always have larger ids than their gate, so walking the ids
/// backwards visits every operand before its gate and each node is
/// computed exactly once.
pub fn compute_metrics(kinds: &[NodeKind], config: &LayoutConfig) -> Vec<NodeMetrics> {
    let mut table: Vec<Option<NodeMetrics>> = vec![None; kinds.len()];

    for index in (0..kinds.len()).rev() {
        let kind = &kinds[index];
        let inputs: Vec<NodeMetrics> = kind
            .inputs()
            .iter()
            .filter_map(|id| table.get(id.index()).copied().flatten())
            .collect();

        let (level, fan_in) = match kind {
            NodeKind::Var { .. } => (0, 1),
            _ => (
                1 + inputs.iter().map(|m| m.level).max().unwrap_or(0),
                inputs.iter().map(|m| m.fan_in).sum(),
            ),
        };
        let (width, height) = node_size(kind, fan_in, level, config);

        table[index] = Some(NodeMetrics {
            level,
            fan_in,
            width,
            height,
        });
    }

    table.into_iter().flatten().collect()
}

/// Size of a node before placement.
fn node_size(kind: &NodeKind, fan_in: usize, level: usize, config: &LayoutConfig) -> (f64, f64) {
    let (mut width, mut height) = (config.base_width, config.base_height);

    match kind {
        NodeKind::Var { .. } => {}
        NodeKind::Not { .. } => {
            let extra = fan_in.saturating_sub(1).min(config.not_growth_cap) as f64;
            width += extra * config.not_width_per_leaf;
            height += extra * config.not_height_per_leaf;
        }
        NodeKind::And { .. } | NodeKind::Or { .. } => {
            let extra = fan_in.max(2).saturating_sub(2) as f64;
            width += extra * config.gate_width_per_input;
            height += extra * config.gate_height_per_input;
        }
    }

    width += level as f64 * config.width_per_level;
    height += level as f64 * config.height_per_level;
    (width, height)
}

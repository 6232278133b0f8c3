//! Column placement, centering and collision resolution.

use std::collections::BTreeMap;

use crate::circuit::GraphNode;

use super::LayoutConfig;

/// Position every node and return the canvas size.
pub(super) fn place(nodes: &mut [GraphNode], config: &LayoutConfig) -> (f64, f64) {
    let columns = group_by_level(nodes);

    let max_fan_in: BTreeMap<usize, usize> = columns
        .iter()
        .map(|(&level, ids)| {
            let widest = ids.iter().map(|&i| nodes[i].fan_in).max().unwrap_or(0);
            (level, widest)
        })
        .collect();

    // Columns left to right, each as wide as its widest node.
    let mut x = config.margin_x;
    for ids in columns.values() {
        let column_width = ids
            .iter()
            .map(|&i| nodes[i].width)
            .fold(0.0_f64, f64::max);
        for &i in ids {
            nodes[i].x = x;
        }
        x += column_width + config.column_gap;
    }

    // Initial stacking.
    for (level, ids) in &columns {
        let gap = config.row_gap_for(max_fan_in[level]);
        let mut y = config.margin_y;
        for &i in ids {
            nodes[i].y = y;
            y += nodes[i].height + gap;
        }
    }

    // Leaves stay stacked; every gate level is centered on settled operands,
    // then separated before the next level reads it.
    for (level, ids) in &columns {
        if *level > 0 {
            for &i in ids {
                center_on_inputs(nodes, i);
            }
        }
        separate(nodes, ids, config.min_separation(max_fan_in[level]));
    }

    normalize_top(nodes, config.margin_y);
    canvas_size(nodes, config)
}

/// Node indices per level, each list in id order.
fn group_by_level(nodes: &[GraphNode]) -> BTreeMap<usize, Vec<usize>> {
    let mut columns: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, node) in nodes.iter().enumerate() {
        columns.entry(node.level).or_default().push(i);
    }
    columns
}

fn center_on_inputs(nodes: &mut [GraphNode], index: usize) {
    let inputs = nodes[index].kind.inputs();
    if inputs.is_empty() {
        return;
    }
    let total: f64 = inputs.iter().map(|id| nodes[id.index()].center_y()).sum();
    let center = total / inputs.len() as f64;
    nodes[index].y = center - nodes[index].height / 2.0;
}

/// Greedy top-down sweep: each node keeps at least `min_gap` below the
/// one above it. Relative order is preserved; later nodes may be pushed
/// well below their centered position.
fn separate(nodes: &mut [GraphNode], ids: &[usize], min_gap: f64) {
    let mut order = ids.to_vec();
    order.sort_by(|&a, &b| nodes[a].y.total_cmp(&nodes[b].y).then(a.cmp(&b)));

    for pair in order.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        let lowest_allowed = nodes[upper].bottom() + min_gap;
        if nodes[lower].y < lowest_allowed {
            nodes[lower].y = lowest_allowed;
        }
    }
}

/// Shift everything vertically so the topmost node sits on the margin.
fn normalize_top(nodes: &mut [GraphNode], margin_y: f64) {
    let top = nodes.iter().map(|n| n.y).fold(f64::INFINITY, f64::min);
    if !top.is_finite() {
        return;
    }
    let shift = margin_y - top;
    for node in nodes.iter_mut() {
        node.y += shift;
    }
}

fn canvas_size(nodes: &[GraphNode], config: &LayoutConfig) -> (f64, f64) {
    let right = nodes.iter().map(GraphNode::right).fold(0.0_f64, f64::max);
    let bottom = nodes.iter().map(GraphNode::bottom).fold(0.0_f64, f64::max);
    (
        (right + config.margin_x).max(config.min_width),
        (bottom + config.margin_y).max(config.min_height),
    )
}

//! Signal evaluation and interactive diagram sessions.
//!
//! Evaluation walks the graph in non-decreasing level order so every gate
//! sees settled operands, memoizing one [`Signal`] per node id. Gates
//! combine operands left to right in three-valued logic:
//!
//! | Gate | Result |
//! |------|--------|
//! | NOT | complement, unknown stays unknown |
//! | AND | `0` at the first `0` operand; otherwise `?` if any operand is `?`; otherwise `1` |
//! | OR  | `1` at the first `1` operand; otherwise `?` if any operand is `?`; otherwise `0` |
//!
//! Operand order does not matter for a dominating operand: `0.?` and `?.0`
//! are both `0`, and `1 + ?` and `? + 1` are both `1`. Operands after the
//! first dominating one are not read.

mod assignment;
mod session;

pub use assignment::Assignment;
pub use session::DiagramSession;

use tracing::debug;

use crate::circuit::{Graph, NodeId, NodeKind, Signal};

/// Variable lookup used during one evaluation.
enum Values<'a> {
    /// Unset names read as `false`, and that default is stored.
    Persisting(&'a mut Assignment),
    /// Unset names read as unknown.
    ReadOnly(&'a Assignment),
}

impl Values<'_> {
    fn signal(&mut self, name: char) -> Signal {
        match self {
            Self::Persisting(table) => Signal::from(table.get_or_default(name)),
            Self::ReadOnly(table) => table.get(name).map_or(Signal::Unknown, Signal::from),
        }
    }
}

/// Evaluate every node, defaulting unset variables to `false` and storing
/// that default in `assignment`. Returns the output signal.
pub fn evaluate(graph: &mut Graph, assignment: &mut Assignment) -> Signal {
    run(graph, Values::Persisting(assignment))
}

/// Evaluate every node, treating unset variables as unknown.
/// `assignment` is left untouched. Returns the output signal.
pub fn evaluate_partial(graph: &mut Graph, assignment: &Assignment) -> Signal {
    run(graph, Values::ReadOnly(assignment))
}

fn run(graph: &mut Graph, values: Values<'_>) -> Signal {
    let memo = {
        let mut evaluator = Evaluator::new(graph, values);
        for id in evaluation_order(graph) {
            evaluator.signal_of(id);
        }
        evaluator.memo
    };

    for (node, signal) in graph.nodes.iter_mut().zip(&memo) {
        node.signal = *signal;
    }
    for edge in &mut graph.edges {
        edge.value = memo.get(edge.from.index()).copied().flatten();
    }

    let output = graph.output().unwrap_or(Signal::Unknown);
    debug!(%output, nodes = graph.nodes.len(), "evaluated diagram");
    output
}

/// Node ids sorted by level; ties keep id order.
fn evaluation_order(graph: &Graph) -> Vec<NodeId> {
    let mut order: Vec<NodeId> = graph.nodes.iter().map(|n| n.id).collect();
    order.sort_by_key(|id| graph.node(*id).map_or(0, |n| n.level));
    order
}

struct Evaluator<'a> {
    graph: &'a Graph,
    values: Values<'a>,
    memo: Vec<Option<Signal>>,
}

impl<'a> Evaluator<'a> {
    fn new(graph: &'a Graph, values: Values<'a>) -> Self {
        Self {
            graph,
            values,
            memo: vec![None; graph.nodes.len()],
        }
    }

    /// Memoized signal of a node. Operands not yet computed are computed on demand.
    fn signal_of(&mut self, id: NodeId) -> Signal {
        if let Some(signal) = self.memo.get(id.index()).copied().flatten() {
            return signal;
        }
        let graph = self.graph;
        let Some(node) = graph.node(id) else {
            return Signal::Unknown;
        };

        let signal = match &node.kind {
            NodeKind::Var { name } => self.values.signal(*name),
            NodeKind::Not { input } => self.signal_of(*input).invert(),
            NodeKind::And { inputs } => self.fold(inputs, Signal::Low),
            NodeKind::Or { inputs } => self.fold(inputs, Signal::High),
        };
        self.memo[id.index()] = Some(signal);
        signal
    }

    /// Left-to-right fold that stops at the first `dominant` operand.
    fn fold(&mut self, inputs: &[NodeId], dominant: Signal) -> Signal {
        let mut saw_unknown = false;
        for &input in inputs {
            match self.signal_of(input) {
                s if s == dominant => return dominant,
                Signal::Unknown => saw_unknown = true,
                _ => {}
            }
        }
        if saw_unknown {
            Signal::Unknown
        } else {
            dominant.invert()
        }
    }
}

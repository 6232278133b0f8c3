//! Interactive diagram session.

use tracing::{debug, warn};

use super::{evaluate, Assignment};
use crate::circuit::{Graph, Signal};
use crate::dsl::{self, Expr, LexMode};
use crate::error::{DiagramError, Result};
use crate::layout::{layout_with_config, LayoutConfig};

/// State behind one displayed diagram: the current graph and the switch values.
///
/// Editing the expression rebuilds the graph from scratch; switch values
/// survive edits until [`reset`](Self::reset) is called.
#[derive(Debug, Clone, Default)]
pub struct DiagramSession {
    config: LayoutConfig,
    mode: LexMode,
    graph: Option<Graph>,
    assignment: Assignment,
}

impl DiagramSession {
    /// Create an empty session with default layout and lexer settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with explicit settings.
    pub fn with_config(config: LayoutConfig, mode: LexMode) -> Self {
        Self {
            config,
            mode,
            graph: None,
            assignment: Assignment::new(),
        }
    }

    /// Compile `text`, replace the diagram and evaluate it.
    ///
    /// Blank text clears the diagram and returns `Ok(None)`. On an error the
    /// previous diagram is kept as it was.
    pub fn set_expression(&mut self, text: &str) -> Result<Option<Signal>> {
        if text.trim().is_empty() {
            self.graph = None;
            return Ok(None);
        }

        let ast = match dsl::parse_with_mode(text, self.mode) {
            Ok(ast) => ast,
            Err(e) => {
                warn!(error = %e, "expression rejected, keeping previous diagram");
                return Err(e);
            }
        };
        let mut graph = layout_with_config(&ast, &self.config);
        let output = evaluate(&mut graph, &mut self.assignment);
        self.graph = Some(graph);
        Ok(Some(output))
    }

    /// Flip a variable and re-evaluate. Returns the new output.
    pub fn toggle(&mut self, name: char) -> Result<Signal> {
        self.require_variable(name)?;
        let value = self.assignment.toggle(name);
        debug!(variable = %name.to_ascii_uppercase(), value, "toggled variable");
        Ok(self.reevaluate())
    }

    /// Set a variable and re-evaluate. Returns the new output.
    pub fn set(&mut self, name: char, value: bool) -> Result<Signal> {
        self.require_variable(name)?;
        self.assignment.set(name, value);
        Ok(self.reevaluate())
    }

    /// Forget all switch values; every variable reads `false` again.
    pub fn reset(&mut self) -> Option<Signal> {
        self.assignment.clear();
        self.graph.as_ref()?;
        Some(self.reevaluate())
    }

    /// Current diagram, if an expression is loaded.
    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    /// Expression behind the current diagram.
    pub fn expression(&self) -> Option<&Expr> {
        self.graph.as_ref().map(Graph::ast)
    }

    /// Output of the current diagram.
    pub fn output(&self) -> Option<Signal> {
        self.graph.as_ref().and_then(Graph::output)
    }

    /// Switch values.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    fn require_variable(&self, name: char) -> Result<()> {
        match &self.graph {
            Some(graph) if graph.has_variable(name) => Ok(()),
            _ => Err(DiagramError::UnknownVariable {
                name: name.to_ascii_uppercase(),
            }),
        }
    }

    fn reevaluate(&mut self) -> Signal {
        match self.graph.as_mut() {
            Some(graph) => evaluate(graph, &mut self.assignment),
            None => Signal::Unknown,
        }
    }
}

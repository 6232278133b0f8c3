//! Abstract Syntax Tree types for boolean expressions.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// A parsed boolean expression.
///
/// `And` and `Or` always hold at least two operands; the parser folds a
/// single-operand chain down to the operand itself. Chained operators are
/// flattened (`A.B.C` is one `And` with three operands) while explicit
/// parentheses keep their grouping (`(A.B).C` nests).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Variable leaf
    Var(char),
    /// Negation
    Not(Box<Expr>),
    /// N-ary conjunction, operands in source order
    And(Vec<Expr>),
    /// N-ary disjunction, operands in source order
    Or(Vec<Expr>),
}

impl Expr {
    /// Create a variable leaf. The name is folded to uppercase.
    pub fn var(name: char) -> Self {
        Self::Var(name.to_ascii_uppercase())
    }

    /// Wrap an expression in a negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Expr) -> Self {
        Self::Not(Box::new(child))
    }

    /// The gate kind this node is drawn as.
    pub fn kind(&self) -> GateKind {
        match self {
            Self::Var(_) => GateKind::Var,
            Self::Not(_) => GateKind::Not,
            Self::And(_) => GateKind::And,
            Self::Or(_) => GateKind::Or,
        }
    }

    /// Direct operands, in order.
    pub fn children(&self) -> &[Expr] {
        match self {
            Self::Var(_) => &[],
            Self::Not(child) => std::slice::from_ref(child.as_ref()),
            Self::And(operands) | Self::Or(operands) => operands,
        }
    }

    /// Number of variable leaves under this node (a variable counts once per occurrence).
    pub fn leaf_count(&self) -> usize {
        self.walk()
            .filter(|expr| matches!(expr, Self::Var(_)))
            .count()
    }

    /// Total number of nodes in the tree, which is the node count of its diagram.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Distinct variable names, sorted.
    pub fn variables(&self) -> BTreeSet<char> {
        self.walk()
            .filter_map(|expr| match expr {
                Self::Var(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    /// Depth-first walk in pre-order, on an explicit stack.
    fn walk(&self) -> impl Iterator<Item = &Expr> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let expr = stack.pop()?;
            stack.extend(expr.children().iter().rev());
            Some(expr)
        })
    }

    /// Visit nodes in pre-order. The visit order is the node numbering used by layout.
    pub fn pre_order(&self) -> Vec<&Expr> {
        self.walk().collect()
    }

    /// Whether this node has to be parenthesized when printed as an operand of `parent`.
    fn needs_parens_under(&self, parent: GateKind) -> bool {
        match (parent, self) {
            (_, Self::Var(_) | Self::Not(_)) => false,
            (GateKind::Or, Self::And(_)) => false,
            _ => true,
        }
    }

    fn fmt_operand(&self, parent: GateKind, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_parens_under(parent) {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Prints canonical symbolic syntax that parses back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "{}", name),
            Self::Not(child) => {
                write!(f, "!")?;
                child.fmt_operand(GateKind::Not, f)
            }
            Self::And(operands) | Self::Or(operands) => {
                let kind = self.kind();
                let separator = if kind == GateKind::And { "." } else { " + " };
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    operand.fmt_operand(kind, f)?;
                }
                Ok(())
            }
        }
    }
}

/// Gate kinds a diagram node can be drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    /// Input variable
    Var,
    /// Inverter
    Not,
    /// Conjunction gate
    And,
    /// Disjunction gate
    Or,
}

impl GateKind {
    /// All gate kinds in display order.
    pub const ALL: [GateKind; 4] = [Self::Var, Self::Not, Self::And, Self::Or];

    /// Key used by renderers to look up gate artwork.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Var => "VAR",
            Self::Not => "NOT",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Parse a gate key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Relative path of the optional image asset for this gate.
    ///
    /// Renderers must fall back to a vector shape when the asset is missing.
    pub fn asset_path(&self) -> String {
        format!("images/{}.png", self.key())
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

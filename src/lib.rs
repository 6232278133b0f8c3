//! # Logicdraw Core
//!
//! Boolean expression compiler and logic diagram engine.
//!
//! This library provides:
//! - A small expression language with variables, NOT, AND, OR and parentheses
//! - Layout of the expression as a diagram of gates placed in columns by depth
//! - Live three-valued evaluation as input switches are toggled
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Tokenizer, parser and AST for the expression language
//! - [`circuit`] - Diagram graph representation and validation
//! - [`layout`] - Level assignment, gate sizing and placement
//! - [`eval`] - Signal evaluation and interactive sessions
//!
//! Data flows text → tokens → [`dsl::Expr`] → [`Graph`] → evaluated [`Graph`].
//! Rendering is left to the host: the graph serializes to JSON with every
//! node's position, size and signal and every wire's input pin.
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! logicdraw --set A=1 --set B=0 "A.B + !C"
//! ```
//!
//! ### Library
//!
//! ```
//! use logicdraw_core::{DiagramSession, Signal};
//!
//! let mut session = DiagramSession::new();
//! session.set_expression("A.B + !C").unwrap();
//! assert_eq!(session.toggle('C').unwrap(), Signal::Low);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmDiagram } from 'logicdraw_core';
//!
//! const diagram = new WasmDiagram('A.B + !C');
//! diagram.toggle('A');
//! render(JSON.parse(diagram.graph_json()));
//! ```

pub mod circuit;
pub mod dsl;
pub mod error;
pub mod eval;
pub mod layout;

// Re-export main types for convenience
pub use circuit::{Graph, NodeId, Signal};
pub use error::{DiagramError, Result};
pub use eval::{evaluate, evaluate_partial, Assignment, DiagramSession};
pub use layout::{layout, LayoutConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmDiagram;

/// Compile an expression into a laid-out, unevaluated diagram.
///
/// Blank input is rejected with [`DiagramError::EmptyExpression`].
pub fn compile(input: &str) -> Result<Graph> {
    compile_with(input, dsl::LexMode::default(), &LayoutConfig::default())
}

/// Compile with explicit lexer mode and layout settings.
pub fn compile_with(input: &str, mode: dsl::LexMode, config: &LayoutConfig) -> Result<Graph> {
    if input.trim().is_empty() {
        return Err(DiagramError::EmptyExpression);
    }
    let ast = dsl::parse_with_mode(input, mode)?;
    Ok(layout::layout_with_config(&ast, config))
}

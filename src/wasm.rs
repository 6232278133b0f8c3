//! WASM bindings for Logicdraw Core.
//!
//! This module provides JavaScript-friendly bindings for use in web pages
//! that draw the diagram themselves.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmDiagram } from 'logicdraw_core';
//!
//! await init();
//!
//! const diagram = new WasmDiagram('A.B + !C');
//!
//! input.addEventListener('input', () => {
//!   try {
//!     diagram.set_expression(input.value);
//!   } catch (err) {
//!     showError(err);   // previous diagram is still valid
//!   }
//!   draw(JSON.parse(diagram.graph_json()));
//! });
//!
//! switchA.addEventListener('change', () => {
//!   diagram.toggle('A');
//!   draw(JSON.parse(diagram.graph_json()));
//! });
//! ```

use wasm_bindgen::prelude::*;

use crate::eval::DiagramSession;
use crate::error::DiagramError;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible diagram session.
///
/// Wraps [`DiagramSession`]; the graph is handed to JavaScript as JSON.
#[wasm_bindgen]
pub struct WasmDiagram {
    session: DiagramSession,
}

#[wasm_bindgen]
impl WasmDiagram {
    /// Create a session showing `expression` (may be empty).
    #[wasm_bindgen(constructor)]
    pub fn new(expression: &str) -> Result<WasmDiagram, JsValue> {
        let mut session = DiagramSession::new();
        session.set_expression(expression).map_err(to_js)?;
        Ok(WasmDiagram { session })
    }

    /// Replace the expression. On error the previous diagram is kept.
    ///
    /// Returns the output, or `undefined` when the diagram is empty.
    #[wasm_bindgen]
    pub fn set_expression(&mut self, expression: &str) -> Result<Option<bool>, JsValue> {
        let output = self.session.set_expression(expression).map_err(to_js)?;
        Ok(output.and_then(|s| s.to_bool()))
    }

    /// Flip a variable's switch. Returns the new output.
    #[wasm_bindgen]
    pub fn toggle(&mut self, name: char) -> Result<Option<bool>, JsValue> {
        let output = self.session.toggle(name).map_err(to_js)?;
        Ok(output.to_bool())
    }

    /// Set a variable's switch. Returns the new output.
    #[wasm_bindgen]
    pub fn set(&mut self, name: char, value: bool) -> Result<Option<bool>, JsValue> {
        let output = self.session.set(name, value).map_err(to_js)?;
        Ok(output.to_bool())
    }

    /// Turn every switch off.
    #[wasm_bindgen]
    pub fn reset(&mut self) -> Option<bool> {
        self.session.reset().and_then(|s| s.to_bool())
    }

    /// Current output, or `undefined` when empty or unknown.
    #[wasm_bindgen]
    pub fn output(&self) -> Option<bool> {
        self.session.output().and_then(|s| s.to_bool())
    }

    /// Variables in the diagram, in name order.
    #[wasm_bindgen]
    pub fn variables(&self) -> String {
        self.session
            .expression()
            .map(|expr| expr.variables().into_iter().collect())
            .unwrap_or_default()
    }

    /// The laid-out, evaluated graph as JSON, or `null` when empty.
    #[wasm_bindgen]
    pub fn graph_json(&self) -> Result<String, JsValue> {
        match self.session.graph() {
            Some(graph) => graph.to_json().map_err(to_js),
            None => Ok("null".to_string()),
        }
    }
}

fn to_js(err: DiagramError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

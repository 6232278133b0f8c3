//! Property-based tests for the expression pipeline
//!
//! These tests check parser, layout and evaluator invariants over randomly
//! generated expression trees using proptest.

use logicdraw_core::circuit::validate_graph;
use logicdraw_core::dsl::{self, Expr};
use logicdraw_core::{evaluate, evaluate_partial, layout, Assignment, LayoutConfig, Signal};
use proptest::prelude::*;

// ============================================================================
// Helper functions
// ============================================================================

/// Expression trees over variables A..E, honoring the n-ary arity invariant
fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop::char::range('A', 'E').prop_map(Expr::Var);
    leaf.prop_recursive(5, 48, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::not),
            prop::collection::vec(inner.clone(), 2..5).prop_map(Expr::And),
            prop::collection::vec(inner, 2..5).prop_map(Expr::Or),
        ]
    })
}

/// Direct recursive evaluation with every variable assigned
fn reference_eval(expr: &Expr, values: &[bool; 5]) -> bool {
    match expr {
        Expr::Var(name) => values[(*name as u8 - b'A') as usize],
        Expr::Not(child) => !reference_eval(child, values),
        Expr::And(operands) => operands.iter().all(|e| reference_eval(e, values)),
        Expr::Or(operands) => operands.iter().any(|e| reference_eval(e, values)),
    }
}

fn full_assignment(values: &[bool; 5]) -> Assignment {
    ('A'..='E').zip(values.iter().copied()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    // --- Parser properties ---

    #[test]
    fn prop_print_then_parse_is_identity(expr in arb_expr()) {
        let printed = expr.to_string();
        let reparsed = dsl::parse(&printed).unwrap();
        prop_assert_eq!(&reparsed, &expr);
        prop_assert_eq!(reparsed.to_string(), printed);
    }

    #[test]
    fn prop_symbolic_and_keyword_modes_agree_on_symbols(expr in arb_expr()) {
        let printed = expr.to_string();
        let symbolic = dsl::parse_with_mode(&printed, dsl::LexMode::Symbolic).unwrap();
        prop_assert_eq!(symbolic, expr);
    }

    #[test]
    fn prop_arbitrary_text_never_panics(text in "[A-Za-z!.+() #]{0,24}") {
        let _ = dsl::parse(&text);
    }

    // --- Layout properties ---

    #[test]
    fn prop_layout_invariants(expr in arb_expr()) {
        let config = LayoutConfig::default();
        let graph = layout(&expr);
        prop_assert_eq!(graph.nodes.len(), expr.node_count());
        prop_assert!(validate_graph(&graph, &config).is_ok());
        for edge in &graph.edges {
            let from = graph.node(edge.from).unwrap();
            let to = graph.node(edge.to).unwrap();
            prop_assert!(from.level < to.level);
            prop_assert!(edge.slot < edge.slot_total);
            prop_assert_eq!(edge.slot_total, to.kind.inputs().len());
        }
    }

    #[test]
    fn prop_layout_is_deterministic(expr in arb_expr()) {
        let first = layout(&expr);
        let second = layout(&expr);
        prop_assert_eq!(first.nodes, second.nodes);
        prop_assert_eq!(first.edges, second.edges);
        prop_assert_eq!(first.width, second.width);
        prop_assert_eq!(first.height, second.height);
    }

    #[test]
    fn prop_fan_in_counts_leaves(expr in arb_expr()) {
        let graph = layout(&expr);
        for node in &graph.nodes {
            let sub = graph.expr(node.id).unwrap();
            prop_assert_eq!(node.fan_in, sub.leaf_count());
            prop_assert_eq!(node.kind.gate(), sub.kind());
        }
    }

    // --- Evaluator properties ---

    #[test]
    fn prop_evaluate_matches_reference(expr in arb_expr(), values in any::<[bool; 5]>()) {
        let mut graph = layout(&expr);
        let mut assignment = full_assignment(&values);
        let output = evaluate(&mut graph, &mut assignment);
        prop_assert_eq!(output, Signal::from(reference_eval(&expr, &values)));

        for node in &graph.nodes {
            let sub = graph.expr(node.id).unwrap();
            prop_assert_eq!(node.signal, Some(Signal::from(reference_eval(sub, &values))));
        }
    }

    #[test]
    fn prop_known_partial_result_agrees(expr in arb_expr(), values in any::<[bool; 5]>(), mask in any::<[bool; 5]>()) {
        // Any known result under a partial assignment must hold for the full one.
        let partial: Assignment = ('A'..='E')
            .zip(values.iter().copied())
            .zip(mask.iter().copied())
            .filter(|(_, keep)| *keep)
            .map(|(pair, _)| pair)
            .collect();
        let mut graph = layout(&expr);
        if let Some(known) = evaluate_partial(&mut graph, &partial).to_bool() {
            prop_assert_eq!(known, reference_eval(&expr, &values));
        }
    }
}

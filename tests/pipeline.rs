//! End-to-end tests: text in, laid-out and evaluated diagram out.

use logicdraw_core::circuit::{validate_graph, NodeKind};
use logicdraw_core::dsl::{self, Expr, GateKind};
use logicdraw_core::{
    compile, evaluate, evaluate_partial, Assignment, DiagramError, DiagramSession,
    LayoutConfig, NodeId, Signal,
};

fn var(name: char) -> Expr {
    Expr::var(name)
}

#[test]
fn double_negation_is_kept() {
    assert_eq!(dsl::parse("!!A").unwrap(), Expr::not(Expr::not(var('A'))));
    let graph = compile("!!A").unwrap();
    let levels: Vec<usize> = graph.nodes.iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![2, 1, 0]);
}

#[test]
fn chained_and_is_one_gate() {
    let graph = compile("A.B.C").unwrap();
    assert_eq!(graph.nodes.len(), 4);
    let root = graph.root_node().unwrap();
    assert_eq!(root.kind.gate(), GateKind::And);
    assert_eq!(root.level, 1);
    assert_eq!(root.fan_in, 3);
    assert_eq!(graph.edges.len(), 3);
}

#[test]
fn precedence() {
    assert_eq!(
        dsl::parse("A + B.C").unwrap(),
        Expr::Or(vec![var('A'), Expr::And(vec![var('B'), var('C')])])
    );
}

#[test]
fn malformed_input_errors() {
    assert!(matches!(compile("(A.B"), Err(DiagramError::ParseError { .. })));
    assert!(matches!(compile("A.B)"), Err(DiagramError::ParseError { .. })));
    assert!(matches!(
        compile("A # B"),
        Err(DiagramError::LexError {
            position: 2,
            character: '#'
        })
    ));
    assert!(matches!(compile("  "), Err(DiagramError::EmptyExpression)));
}

#[test]
fn evaluation_examples() {
    let mut graph = compile("A.B + !C").unwrap();

    let mut values: Assignment = [('A', true), ('B', false), ('C', false)].into_iter().collect();
    assert_eq!(evaluate(&mut graph, &mut values), Signal::High);

    let mut values: Assignment = [('A', true), ('B', true), ('C', true)].into_iter().collect();
    assert_eq!(evaluate(&mut graph, &mut values), Signal::High);
    let and = graph.node(NodeId(1)).unwrap();
    let not = graph.node(NodeId(4)).unwrap();
    assert_eq!(and.signal, Some(Signal::High));
    assert_eq!(not.signal, Some(Signal::Low));
}

#[test]
fn false_short_circuits_unknown_branch() {
    let mut graph = compile("A.(B + !D)").unwrap();
    let values: Assignment = [('A', false)].into_iter().collect();
    assert_eq!(evaluate_partial(&mut graph, &values), Signal::Low);

    let or = graph.node(NodeId(2)).unwrap();
    assert!(matches!(or.kind, NodeKind::Or { .. }));
    assert_eq!(or.signal, Some(Signal::Unknown));
}

#[test]
fn layout_separates_wide_levels() {
    let config = LayoutConfig::default();
    let graph = compile("(A.B.C.D) + (E.F.G.H) + (A+B+C) + !(D.E)").unwrap();
    validate_graph(&graph, &config).unwrap();

    let levels = graph.levels();
    let gates = &levels[&1];
    assert_eq!(gates.len(), 4);
    let wide = graph.node(gates[0]).unwrap();
    let narrow = graph.node(*gates.last().unwrap()).unwrap();
    assert!(wide.height > narrow.height);
}

#[test]
fn json_output_for_renderer() {
    let mut graph = compile("A + !B").unwrap();
    evaluate(&mut graph, &mut Assignment::new());
    let json: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();

    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0]["kind"], "OR");
    assert_eq!(nodes[0]["signal"], "true");
    assert_eq!(nodes[1]["kind"], "VAR");
    assert_eq!(nodes[1]["name"], "A");
    assert_eq!(nodes[2]["input"], 3);

    let edge = &json["edges"][0];
    assert_eq!(edge["from"], 1);
    assert_eq!(edge["to"], 0);
    assert_eq!(edge["slot"], 0);
    assert_eq!(edge["slot_total"], 2);
    assert_eq!(edge["value"], "false");
    assert_eq!(json["root"], 0);
}

#[test]
fn session_round_trip() {
    let mut session = DiagramSession::new();
    session.set_expression("x and not y").unwrap();
    assert_eq!(session.expression().unwrap().to_string(), "X.!Y");
    assert_eq!(session.output(), Some(Signal::Low));
    assert_eq!(session.toggle('x').unwrap(), Signal::High);
    assert_eq!(session.toggle('Y').unwrap(), Signal::Low);
    assert_eq!(session.reset(), Some(Signal::Low));
}

#[test]
fn deep_nesting_is_rejected() {
    let mut session = DiagramSession::new();
    session.set_expression("A.B").unwrap();

    for n in [2_000, 10_000] {
        let text = format!("{}A{}", "(!".repeat(n), ")".repeat(n));
        assert!(matches!(
            session.set_expression(&text),
            Err(DiagramError::NestingTooDeep { .. })
        ));
    }
    assert_eq!(session.expression().map(ToString::to_string), Some("A.B".into()));

    let text = format!("{}A", "!".repeat(100_000));
    assert!(matches!(compile(&text), Err(DiagramError::NestingTooDeep { .. })));
}

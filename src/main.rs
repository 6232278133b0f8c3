//! Logicdraw - Boolean Expression Diagram Tool
//!
//! Compiles a boolean expression into a laid-out logic diagram and
//! evaluates it for a set of input values.
//!
//! # Usage
//!
//! ```bash
//! logicdraw --set A=1 --set C=1 "A.B + !C"
//! logicdraw --format json -f expr.txt > diagram.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use logicdraw_core::{
    circuit::{validate_graph, Graph},
    dsl::{self, LexMode},
    error::Result,
    evaluate, Assignment, DiagramError, LayoutConfig,
};
use tracing::Level;

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line per node, then the output value
    Text,
    /// Full graph for a renderer
    Json,
}

/// Boolean expression diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Expression, e.g. "A.B + !C" or "a and not b"
    #[arg(value_name = "EXPR", required_unless_present = "file")]
    expression: Option<String>,

    /// Read the expression from a file instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Input value, repeatable (A=1, b=false)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Only accept symbols (!, ., +) with single-letter variables
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Base vertical gap between nodes in a column (negative counts as 0)
    #[arg(long, default_value_t = LayoutConfig::default().row_gap)]
    gap: f64,

    /// Horizontal gap between columns (negative counts as 0)
    #[arg(long, default_value_t = LayoutConfig::default().column_gap)]
    column_gap: f64,

    /// Verify layout invariants before printing
    #[arg(long)]
    check: bool,

    /// Log pipeline steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let source = match (&args.expression, &args.file) {
        (Some(expression), _) => expression.clone(),
        (None, Some(path)) => dsl::read_file(path)?,
        (None, None) => return Err(DiagramError::EmptyExpression),
    };

    let mut assignment = args
        .set
        .iter()
        .map(|pair| Assignment::parse_pair(pair))
        .collect::<Result<Assignment>>()?;

    let mode = if args.strict {
        LexMode::Symbolic
    } else {
        LexMode::Keywords
    };
    let config = LayoutConfig::new()
        .with_row_gap(args.gap)
        .with_column_gap(args.column_gap);

    let mut graph = logicdraw_core::compile_with(&source, mode, &config)?;
    if args.check {
        validate_graph(&graph, &config)?;
    }
    evaluate(&mut graph, &mut assignment);

    match args.format {
        Format::Json => println!("{}", graph.to_json()?),
        Format::Text => print_text(&graph),
    }
    Ok(())
}

fn print_text(graph: &Graph) {
    println!("{}", graph.ast());
    println!(
        "{:<5} {:<4} {:<5} {:>5} {:>15} {:>15} {:>3}",
        "id", "kind", "label", "level", "position", "size", "sig"
    );
    for node in &graph.nodes {
        let signal = node.signal.map_or("-".to_string(), |s| s.to_string());
        println!(
            "{:<5} {:<4} {:<5} {:>5} {:>15} {:>15} {:>3}",
            node.id.to_string(),
            node.kind.gate().key(),
            node.label,
            node.level,
            format!("({:.0}, {:.0})", node.x, node.y),
            format!("{:.0}x{:.0}", node.width, node.height),
            signal,
        );
    }
    let output = graph.output().map_or("-".to_string(), |s| s.to_string());
    println!("output = {output}");
}

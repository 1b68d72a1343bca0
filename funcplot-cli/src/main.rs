//! `funcplot` CLI: run curve-plotting programs and output SVG.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use tracing::{debug, info};

use funcplot_core::error::{InterpreterError, Severity};
use funcplot_core::interpreter::Interpreter;
use funcplot_core::parser::Parser as ProgramParser;
use funcplot_core::scanner::Scanner;
use funcplot_svg::{RenderOptions, render_with_options};

#[derive(Parser)]
#[command(version, about = "funcplot: plot parametric curves described in a small language")]
struct Cli {
    /// Program file to run
    file: Option<String>,

    /// Run this source text instead of reading a file
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Output directory for the SVG file
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Padding around the plotted range, in plot units
    #[arg(long, default_value_t = 50.0)]
    margin: f64,

    /// Decimal places for SVG coordinates
    #[arg(long, default_value_t = 4)]
    precision: usize,

    /// Largest number of samples a single loop may take (0: unlimited)
    #[arg(long, default_value_t = 1_000_000)]
    max_samples: usize,

    /// Print the token stream instead of running the program
    #[arg(long)]
    tokens: bool,

    /// Print the parsed statement trees instead of running the program
    #[arg(long)]
    tree: bool,

    /// Log interpreter activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = read_source(&cli);

    if cli.tokens || cli.tree {
        if cli.tokens {
            print_tokens(&source);
        }
        if cli.tree {
            print_tree(&source);
        }
        return;
    }

    let mut interp = Interpreter::new();
    interp.set_sample_limit((cli.max_samples > 0).then_some(cli.max_samples));
    run_and_output(&mut interp, &source, &cli);
}

/// `RUST_LOG` wins; otherwise `--verbose` turns on debug output.
fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(cli: &Cli) -> String {
    if let Some(ref source) = cli.eval {
        return source.clone();
    }
    if let Some(ref file) = cli.file {
        match fs::read_to_string(file) {
            Ok(s) => {
                debug!(file = %file, bytes = s.len(), "read program");
                return s;
            }
            Err(e) => {
                eprintln!("Error reading {file}: {e}");
                process::exit(1);
            }
        }
    }
    eprintln!("No input file or source text specified");
    process::exit(1);
}

fn print_tokens(source: &str) {
    for tok in Scanner::new(source).keep_comments().scan_all() {
        println!(
            "{:>5}..{:<5} {:<14} {}",
            tok.span.start,
            tok.span.end,
            tok.kind.category().name(),
            tok.lexeme
        );
    }
}

fn print_tree(source: &str) {
    match ProgramParser::parse_program(source) {
        Ok(statements) => {
            for stmt in statements {
                print!("{stmt}");
            }
        }
        Err(e) => {
            print_error(&e);
            process::exit(1);
        }
    }
}

fn run_and_output(interp: &mut Interpreter, source: &str, cli: &Cli) {
    let failed = interp.run(source).is_err();

    // Diagnostics include the batches drawn before a failure.
    print_diagnostics(interp);

    // Batches drawn before a failure are still written out.
    if !failed || !interp.picture.is_empty() {
        write_output(interp, cli);
    }
    if failed {
        process::exit(1);
    }
}

fn print_diagnostics(interp: &Interpreter) {
    for err in &interp.errors {
        match err.severity {
            Severity::Info => println!("{}", err.message),
            Severity::Error => print_error(err),
        }
    }
}

fn print_error(err: &InterpreterError) {
    eprintln!("Error: {}: {err}", err.kind.class());
}

fn write_output(interp: &Interpreter, cli: &Cli) {
    let opts = RenderOptions {
        margin: cli.margin,
        precision: cli.precision,
    };
    let svg = render_with_options(&interp.picture, &opts).to_string();

    let filename = cli.file.as_deref().filter(|_| cli.eval.is_none()).map_or_else(
        || "plot.svg".to_owned(),
        |file| {
            let stem = Path::new(file)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("plot");
            format!("{stem}.svg")
        },
    );

    let path = Path::new(&cli.output).join(filename);
    match fs::write(&path, svg) {
        Ok(()) => {
            info!(path = %path.display(), strokes = interp.picture.strokes.len(), "wrote svg");
            eprintln!("Wrote {}", path.display());
        }
        Err(e) => {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        }
    }
}

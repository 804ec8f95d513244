//! Apply a selection command to every line of standard input.
//!
//! Each input line stands in for one editor selection; the replacement texts
//! are printed one per line.
//!
//! # Usage
//!
//! Map every line through a formula:
//! ```sh
//! printf '1\n2\n3\n' | cargo run --example map_lines -- map 'x * 2 + i'
//! ```
//!
//! Number the lines:
//! ```sh
//! printf 'a\nb\n' | cargo run --example map_lines -- index
//! ```
//!
//! Check a formula without reading input:
//! ```sh
//! cargo run --example map_lines -- check 'pow(x)'
//! ```

use clap::{Parser, Subcommand};
use cursor_formula::{Formula, ParseError, selection};
use std::io::{self, BufRead, Write};

/// Per-selection arithmetic over standard input lines
#[derive(Parser, Debug)]
#[command(name = "map_lines", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace each line with its zero-based index
    Index,
    /// Add one to each line's number
    Increment,
    /// Subtract one from each line's number
    Decrement,
    /// Evaluate FORMULA with `x` bound to the line's number and `i` to its index
    Map {
        #[arg(value_name = "FORMULA")]
        formula: String,
    },
    /// Report whether FORMULA parses, without reading input
    Check {
        #[arg(value_name = "FORMULA")]
        formula: String,
    },
}

fn report(formula: &str, err: &ParseError) {
    eprintln!("Error: {err}");
    eprintln!("  {formula}");
    eprintln!("  {:>width$}", "^", width = err.column());
}

fn read_lines() -> io::Result<Vec<String>> {
    io::stdin().lock().lines().collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let replaced = match &args.command {
        Command::Index => selection::index(read_lines()?.len()),
        Command::Increment => selection::increment(&read_lines()?),
        Command::Decrement => selection::decrement(&read_lines()?),
        Command::Map { formula } => match selection::map(formula, &read_lines()?) {
            Ok(replaced) => replaced,
            Err(err) => {
                report(formula, &err);
                std::process::exit(1);
            },
        },
        Command::Check { formula } => {
            match Formula::validate(formula) {
                Ok(()) => println!("ok"),
                Err(err) => {
                    report(formula, &err);
                    std::process::exit(1);
                },
            }
            return Ok(());
        },
    };

    let mut out = io::stdout().lock();
    for line in replaced {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

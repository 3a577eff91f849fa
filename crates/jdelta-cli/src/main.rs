//! `jdelta` CLI — tolerant parsing and structural comparison of JSON-like
//! documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check how leniently an input parses (tier badge + auto-fix preview)
//! echo "{a: 1, b: [2,3,]}" | jdelta check
//!
//! # Rewrite a relaxed document as strict-leaning JSON
//! jdelta fix -i relaxed.txt -o fixed.json
//!
//! # Compare two documents (text report)
//! jdelta compare a.json b.json
//!
//! # Compare two arrays order-insensitively, emit the JSON report,
//! # exit 1 when they differ
//! jdelta compare --shape array --json --exit-code a.json b.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::process;

use jdelta_core::{compare, parse_and_classify, AnalysisReport, ExpectedShape, SideReport};

#[derive(Parser)]
#[command(
    name = "jdelta",
    version,
    about = "Tolerant JSON parsing and structural comparison"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one input and report which tier accepted it
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Required top-level shape: "array" or "any"
        #[arg(long, default_value = "any")]
        shape: String,
    },
    /// Rewrite a tolerantly-parsed input as strict-leaning JSON
    Fix {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compare two documents and print the difference report
    Compare {
        /// Left-hand input file
        file_a: String,
        /// Right-hand input file
        file_b: String,
        /// Required top-level shape: "array" or "any"
        #[arg(long, default_value = "any")]
        shape: String,
        /// Emit the full report as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Include unchanged entries in the text report
        #[arg(long)]
        show_same: bool,
        /// Exit with status 1 when the inputs differ
        #[arg(long)]
        exit_code: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input, shape } => {
            let shape = parse_shape(&shape)?;
            let text = read_input(input.as_deref())?;
            let parsed = parse_and_classify(&text, shape).context("Input did not parse")?;
            println!("parse: {}", parsed.tier.as_str());
            if let Some(normalized) = parsed.normalized {
                println!("normalized:");
                println!("{}", normalized);
            }
        }
        Commands::Fix { input, output } => {
            let text = read_input(input.as_deref())?;
            let parsed = jdelta_core::parse(&text).context("Input did not parse")?;
            // Already-strict input passes through as-is.
            let fixed = parsed.normalized.unwrap_or(text);
            write_output(output.as_deref(), &fixed)?;
        }
        Commands::Compare {
            file_a,
            file_b,
            shape,
            json,
            show_same,
            exit_code,
        } => {
            let shape = parse_shape(&shape)?;
            let text_a = std::fs::read_to_string(&file_a)
                .with_context(|| format!("Failed to read file: {}", file_a))?;
            let text_b = std::fs::read_to_string(&file_b)
                .with_context(|| format!("Failed to read file: {}", file_b))?;

            let report = compare(&text_a, &text_b, shape)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_text_report(&report, show_same);
            }

            if exit_code && !report.diff.is_unchanged() {
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn parse_shape(shape: &str) -> Result<ExpectedShape> {
    match shape {
        "array" => Ok(ExpectedShape::Array),
        "any" => Ok(ExpectedShape::ObjectOrArray),
        other => anyhow::bail!("Unknown shape: '{}'. Available shapes: array, any", other),
    }
}

fn print_text_report(report: &AnalysisReport, show_same: bool) {
    print_side("A", &report.a);
    print_side("B", &report.b);

    if let (Some(identical), Some(same_set)) = (report.identical, report.same_unique_set) {
        println!("identical:       {}", identical);
        println!("same unique set: {}", same_set);
    }

    let diff = &report.diff;
    if diff.is_unchanged() {
        println!("no differences ({} unchanged entries)", diff.same.len());
        return;
    }

    if !diff.added.is_empty() {
        println!("added ({}):", diff.added.len());
        for entry in &diff.added {
            println!("  + {} = {}", entry.path, entry.value);
        }
    }
    if !diff.removed.is_empty() {
        println!("removed ({}):", diff.removed.len());
        for entry in &diff.removed {
            println!("  - {} = {}", entry.path, entry.value);
        }
    }
    if !diff.changed.is_empty() {
        println!("changed ({}):", diff.changed.len());
        for entry in &diff.changed {
            println!("  ~ {}: {} -> {}", entry.path, entry.from, entry.to);
        }
    }
    if show_same && !diff.same.is_empty() {
        println!("same ({}):", diff.same.len());
        for entry in &diff.same {
            println!("  = {} = {}", entry.path, entry.value);
        }
    }
}

fn print_side(label: &str, side: &SideReport) {
    let mut line = format!("side {}: {} parse", label, side.tier.as_str());
    if let (Some(len), Some(unique)) = (side.len, side.unique_count) {
        line.push_str(&format!(", {} items, {} unique", len, unique));
    }
    println!("{}", line);
    for dup in &side.duplicates {
        println!("  duplicate x{}: {}", dup.count, dup.item);
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

// src/main.rs
// =============================================================================
// Entry point: parse arguments, lint each file, print diagnostics, exit with
// 0 (clean), 1 (problems found) or 2 (internal error).
// =============================================================================

mod checker;
mod cli;
mod config;
mod document;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cli::Cli;
use document::{markdown, CollectedDiagnostics, Fix};

/// One diagnostic, positioned for display.
#[derive(Debug, Serialize)]
struct Problem {
    file: String,
    line: usize,
    column: usize,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<Fix>,
}

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };
    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.build_config()?;

    let mut problems = Vec::new();
    for file in &cli.files {
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let doc = markdown::parse(&source, Some(file.clone()));

        let mut sink = CollectedDiagnostics::default();
        checker::lint_document(&doc, &config, &mut sink).await?;

        for diag in sink.diagnostics {
            let anchor = doc.node(diag.node).span.start + diag.offset;
            let (line, column) = doc.line_col(anchor);
            problems.push(Problem {
                file: file.display().to_string(),
                line,
                column,
                message: diag.message,
                fix: diag.fix,
            });
        }
    }

    print_results(&problems, cli.json)?;

    Ok(if problems.is_empty() { 0 } else { 1 })
}

fn print_results(problems: &[Problem], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(problems)?);
        return Ok(());
    }

    for problem in problems {
        println!(
            "{}:{}:{}  {}",
            problem.file, problem.line, problem.column, problem.message
        );
    }

    if problems.is_empty() {
        println!("✅ No dead links found");
    } else {
        println!("\n❌ {} problem(s) found", problems.len());
    }
    Ok(())
}

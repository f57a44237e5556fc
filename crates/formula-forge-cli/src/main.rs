//! Formula Forge CLI - natural-language to spreadsheet formula translator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formula_forge::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "forge")]
#[command(
    author,
    version,
    about = "Translate English or Indonesian queries into spreadsheet formulas"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a single query
    #[command(alias = "t")]
    Translate {
        /// The query, e.g. "Sum values in column A where column B is Yes"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate one query per line from a file or stdin
    Batch {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// List the built-in query templates
    Templates {
        /// Print the templates as a JSON array
        #[arg(long)]
        json: bool,
    },
}

/// One translated query as printed by `--json`
#[derive(Serialize)]
struct Record<'a> {
    query: &'a str,
    status: u16,
    #[serde(flatten)]
    translation: &'a Translation,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Translate { query, json } => translate_one(&query.join(" "), json),
        Commands::Batch { input, json } => batch(input.as_deref(), json),
        Commands::Templates { json } => list_templates(json),
    }
}

/// `FORGE_LOG`, then `RUST_LOG`, then the level implied by `-v`
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("FORGE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Translate `query`, returning the result and its status code
fn run(translator: &Translator, query: &str) -> (Translation, u16) {
    match translator.try_translate(query) {
        Ok(translation) => (translation, 200),
        Err(err) => {
            debug!(%query, error = %err, "translation failed");
            let status = err.status();
            (Translation::from(err), status)
        }
    }
}

fn translate_one(query: &str, json: bool) -> Result<ExitCode> {
    let translator = Translator::new();
    let (translation, status) = run(&translator, query);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_result(&mut out, query, &translation, status, json)?;

    Ok(if translation.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn batch(input: Option<&Path>, json: bool) -> Result<ExitCode> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let translator = Translator::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut total = 0usize;
    let mut failed = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let (translation, status) = run(&translator, query);
        total += 1;
        if translation.is_error() {
            failed += 1;
        }
        print_result(&mut out, query, &translation, status, json)?;
        if !json {
            writeln!(out)?;
        }
    }

    info!(total, failed, "batch finished");
    eprintln!("Translated {} queries ({} errors)", total - failed, failed);

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_result(
    out: &mut impl Write,
    query: &str,
    translation: &Translation,
    status: u16,
    json: bool,
) -> Result<()> {
    if json {
        let record = Record {
            query,
            status,
            translation,
        };
        serde_json::to_writer(&mut *out, &record).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", translation.formula)?;
        writeln!(out, "{}", translation.explanation)?;
    }
    Ok(())
}

fn list_templates(json: bool) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, templates()).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for (i, template) in templates().iter().enumerate() {
            writeln!(out, "{:>2}. {}", i + 1, template.title)?;
            writeln!(out, "    {}", template.query)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

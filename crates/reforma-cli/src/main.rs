mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::paginas::PaginasArgs;
use commands::simular::SimularArgs;
use commands::tabelas::TabelasArgs;

/// CBS/IBS tax reform impact simulator
#[derive(Parser)]
#[command(
    name = "reforma",
    version,
    about = "CBS/IBS tax reform impact simulator",
    long_about = "Projects how Brazil's consumption-tax reform (CBS/IBS replacing PIS, \
                  COFINS, ICMS and ISS) changes a company's tax burden, from four inputs: \
                  tax regime, sector, revenue bracket and state."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Reference tables to use instead of the built-in set (JSON or YAML)
    #[arg(long, global = true)]
    tabelas: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the reform impact for one company profile
    Simular(SimularArgs),
    /// Assistant context for one company profile
    Contexto(SimularArgs),
    /// Generate page combinations and batch results
    Paginas(PaginasArgs),
    /// Show the active reference tables
    Tabelas(TabelasArgs),
    /// Show the 2026-2033 transition calendar
    Cronograma,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("REFORMA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Some(path) = &cli.tabelas {
        if let Err(e) = commands::tabelas::carregar(path) {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simular(args) => commands::simular::run_simular(args),
        Commands::Contexto(args) => commands::contexto::run_contexto(args),
        Commands::Paginas(args) => commands::paginas::run_paginas(args),
        Commands::Tabelas(args) => commands::tabelas::run_tabelas(args),
        Commands::Cronograma => commands::tabelas::run_cronograma(),
        Commands::Version => {
            println!("reforma {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

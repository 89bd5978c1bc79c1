// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Kestrel command-line interface.
//!
//! This is the main entry point for the `kestrel` command.

use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod diagnostic;

use commands::OutputFormat;

/// Kestrel: check, inspect and format Kestrel source files
#[derive(Debug, Parser)]
#[command(name = "kestrel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse and analyse source files, reporting diagnostics
    Check {
        /// Source file or directory to check
        #[arg(default_value = ".")]
        path: String,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the token stream of a source file
    Tokens {
        /// Source file to tokenize
        path: String,
    },

    /// Print the syntax tree of a source file
    Ast {
        /// Source file to parse
        path: String,
    },

    /// Print a source file in canonical layout
    Fmt {
        /// Source file to format
        path: String,

        /// Exit non-zero if the file is not already formatted
        #[arg(long)]
        check: bool,
    },
}

/// Maps the `-v` count to a tracing filter directive.
fn directive_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "kestrel=info,kestrel_core=info",
        1 => "kestrel=debug,kestrel_core=debug",
        _ => "kestrel=trace,kestrel_core=trace",
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Check { path, format } => commands::check::run_check(&path, format),
        Command::Tokens { path } => commands::tokens::run_tokens(&path),
        Command::Ast { path } => commands::ast::run_ast(&path),
        Command::Fmt { path, check } => commands::fmt::run_fmt(&path, check),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

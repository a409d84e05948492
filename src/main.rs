//! Litweave CLI - Literate Programming Compiler

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use litweave::commands;
use litweave::config::ConfigOverrides;
use litweave::interface::Context;

#[derive(Parser)]
#[command(name = "litweave")]
#[command(author, version, about = "Literate programming compiler", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DocumentArgs {
    /// Root markdown document ("-" reads standard input)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Treat links to .md files in the root document as chapters
    #[arg(short, long)]
    book: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Line directive written before each tangled line (%i indent, %f file, %l line, %% percent)
    #[arg(long, value_name = "PATTERN")]
    line_dir: Option<String>,

    /// Directory for generated HTML (default: directory of the root document)
    #[arg(long, value_name = "DIR")]
    doc_out_dir: Option<PathBuf>,

    /// Text shown before each chunk name in the HTML
    #[arg(long, value_name = "TEXT")]
    chunk_marker: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tangle source files and weave HTML documentation
    Build {
        #[command(flatten)]
        doc: DocumentArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the source files named by root chunks
    Tangle {
        #[command(flatten)]
        doc: DocumentArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write HTML documentation
    Weave {
        #[command(flatten)]
        doc: DocumentArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Scan and validate without writing anything
    Check {
        #[command(flatten)]
        doc: DocumentArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn build_options(doc: DocumentArgs, output: OutputArgs) -> commands::BuildOptions {
    commands::BuildOptions {
        input: doc.input,
        overrides: ConfigOverrides {
            book: doc.book,
            line_directive: output.line_dir,
            doc_out_dir: output.doc_out_dir,
            chunk_name_marker: output.chunk_marker,
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Read configuration from file or use defaults
    let config = match cli.config {
        Some(ref path) => litweave::config::read_config_file(path),
        None => litweave::config::read_config(&base_dir),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = Context::new(config, base_dir);

    // Execute command
    let result = match cli.command {
        Commands::Build { doc, output } => commands::build(&mut ctx, build_options(doc, output)),
        Commands::Tangle { doc, output } => commands::tangle(&mut ctx, build_options(doc, output)),
        Commands::Weave { doc, output } => commands::weave(&mut ctx, build_options(doc, output)),
        Commands::Check { doc, json } => {
            let options = commands::CheckOptions {
                input: doc.input,
                book: doc.book,
                json,
            };
            commands::check(&mut ctx, options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

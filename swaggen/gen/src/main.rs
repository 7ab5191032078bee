//! Swaggen Code Generator
//!
//! Generates typed Rust client code from Swagger API descriptions.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use swaggen_gen::errors::GeneratorError;
use swaggen_gen::output::{Destination, GenerateOptions, render, write_output};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Swaggen code generator - transforms Swagger API descriptions into typed Rust clients
#[derive(Parser, Debug)]
#[command(name = "swaggen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a Rust client from a Swagger JSON file
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Write the generated code to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Prefix removed from operation ids before deriving function names
    #[arg(long, value_name = "PREFIX")]
    strip_prefix: Option<String>,

    /// Emit unformatted (but validated) code
    #[arg(long)]
    no_format: bool,

    /// Swagger JSON file to generate from
    schema_file: Option<PathBuf>,

    /// Sub-namespace recorded in the generated module docs
    sub_namespace: Option<String>,
}

impl GenerateArgs {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            strip_prefix: self.strip_prefix.clone(),
            sub_namespace: self.sub_namespace.clone(),
            format: !self.no_format,
        }
    }
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate(args),
    }
}

/// Installs a stderr subscriber; stdout is reserved for generated code.
fn init_logging(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "error".to_string(),
            1 => "warn,swaggen=debug,swaggen_gen=debug,swaggen_define=debug".to_string(),
            _ => "debug,swaggen=trace,swaggen_gen=trace,swaggen_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn generate(args: GenerateArgs) -> Result<(), GeneratorError> {
    let Some(schema_file) = &args.schema_file else {
        return print_generate_usage();
    };

    let options = args.options();
    options.validate()?;

    debug!(schema = %schema_file.display(), ?options, "loading schema");
    let schema = swaggen_define::load(schema_file)?;

    let generated = render(&schema, &options)?;
    let destination = Destination::from(args.output.clone());
    write_output(&generated.code, &destination)?;

    for warning in &generated.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    for error in &generated.errors {
        eprintln!("{} {}", "error:".red().bold(), error);
    }

    if generated.is_complete() {
        if let Destination::File(path) = &destination {
            eprintln!(
                "{} {} ({} types, {} functions)",
                "Generated".green().bold(),
                path.display(),
                generated.module.declarations.len(),
                generated.module.functions.len()
            );
        }
        Ok(())
    } else {
        Err(GeneratorError::Incomplete {
            count: generated.errors.len(),
        })
    }
}

/// Prints the `generate` usage; a missing schema file is not an error.
fn print_generate_usage() -> Result<(), GeneratorError> {
    let mut command = Cli::command();
    let usage = match command.find_subcommand_mut("generate") {
        Some(generate) => generate.render_help(),
        None => command.render_help(),
    };
    println!("{usage}");
    Ok(())
}

//! # schemac
//!
//! Command-line interface of the schemac schema compiler.
//!
//! Loads YAML model documents, parses and links them into packages, and
//! renders Go sources from them.

mod config;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use config::CliConfig;
use schemac_codegen::GoGenerator;
use schemac_codegen::go::go_typemap;
use schemac_codegen::naming::proto_pascal;
use schemac_ir::Package;
use schemac_linker::TypeLinker;
use schemac_loader::{DocumentFormat, SchemaLoader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemac")]
#[command(about = "Compile YAML schema models into typed packages and Go sources")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read documents without the version/kind envelope
    #[arg(long, global = true)]
    bare: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a schema and report its packages or diagnostics
    Check {
        /// Schema file or manifest directory
        source: String,
    },

    /// Print the package IR
    Inspect {
        /// Schema file or manifest directory
        source: String,

        /// Print JSON instead of the text dump
        #[arg(long)]
        json: bool,

        /// Resolve field types against the Go type map first
        #[arg(long)]
        link: bool,
    },

    /// Generate Go sources
    Gogo {
        /// Schema file or manifest directory
        source: String,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let format = if cli.bare {
        DocumentFormat::Bare
    } else {
        DocumentFormat::Envelope
    };

    match cli.command {
        Commands::Check { source } => {
            let packages = compile(&source, format)?;
            for package in &packages {
                println!(
                    "package {}: {} enums, {} structures",
                    package.name,
                    package.enums.len(),
                    package.structures.len()
                );
            }
            println!("ok: {} packages", packages.len());
        }
        Commands::Inspect { source, json, link } => {
            let mut packages = compile(&source, format)?;
            if link {
                let mut typemap = go_typemap();
                typemap.extend(config.typemap);
                TypeLinker::new(typemap)
                    .with_naming(proto_pascal)
                    .link(&mut packages);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&packages)?);
            } else {
                let dump: Vec<String> = packages.iter().map(ToString::to_string).collect();
                println!("{}", dump.join("\n\n"));
            }
        }
        Commands::Gogo { source, out } => {
            let packages = compile(&source, format)?;
            let out = out
                .or(config.out)
                .unwrap_or_else(|| PathBuf::from("."));

            let mut generator = GoGenerator::new(out).with_types(config.typemap);
            if let Some(package) = config.package {
                generator = generator.with_package(package);
            }
            for (package, path) in config.imports {
                generator = generator.with_import(package, path);
            }

            let written = generator
                .run(&packages)
                .context("failed to generate Go sources")?;
            for path in written {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

/// Load, parse and batch-link a schema source
fn compile(source: &str, format: DocumentFormat) -> anyhow::Result<Vec<Package>> {
    let documents = SchemaLoader::new()
        .with_format(format)
        .load(source)
        .with_context(|| format!("failed to load {source}"))?;
    info!("Loaded {} documents from {}", documents.len(), source);

    let packages = schemac_parser::parse(&documents)
        .with_context(|| format!("schema {source} is invalid"))?;
    Ok(packages)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

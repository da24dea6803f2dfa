//! Command-line interface for the bomuml utility
//!
//! Reads an object-model JSON document from a file or stdin, renders it
//! as PlantUML class-diagram markup, and writes the result to a file or
//! stdout.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use bomuml::core::logging::init_logging;
use bomuml::diagram::ClassDiagramWriter;
use bomuml::load_model;

/// bomuml - Render a business object model as a PlantUML class diagram
#[derive(Parser)]
#[command(name = "bomuml")]
#[command(about = "Render a business object model as a PlantUML class diagram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Object model input file (use - for stdin)
    #[arg(short, long, visible_alias = "bom", value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Output file for the diagram markup (use - for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Run the application with the given CLI arguments
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging with CLI flags (environment variables take precedence)
    let log_level = std::env::var("BOMUML_LOG_LEVEL")
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .or_else(|| Some(cli.log_level.as_str().to_string()));

    let log_format = std::env::var("BOMUML_LOG_FORMAT")
        .ok()
        .or_else(|| Some(cli.log_format.as_str().to_string()));

    if let Err(e) = init_logging(log_level.as_deref(), log_format.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    if cli.verbose {
        eprintln!("bomuml v{}", env!("CARGO_PKG_VERSION"));
    }

    let content = read_input(cli.model)?;

    if cli.verbose {
        eprintln!("Read {} bytes of input", content.len());
    }

    let model = load_model(&content)?;
    let diagram = ClassDiagramWriter::new().write_model(&model);

    if cli.verbose {
        eprintln!("Rendered {} classes", model.class_count());
    }

    write_output(cli.output, &diagram)?;
    Ok(())
}

/// Read input from file or stdin
pub fn read_input(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => {
            if path.to_string_lossy() == "-" {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            } else {
                fs::read_to_string(&path)
                    .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
            }
        }
        None => {
            // No input file specified, read from stdin
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

/// Write output to file or stdout
pub fn write_output(output: Option<PathBuf>, content: &str) -> Result<()> {
    let stdout_content = if content.is_empty() || content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    };

    match output {
        Some(path) => {
            if path.to_string_lossy() == "-" {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            } else {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
        }
        None => {
            print!("{}", stdout_content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}

//! Textbox Catalog CLI
//!
//! Usage:
//!   textbox-catalog [OPTIONS] [FILE]
//!
//! Each non-empty input line becomes one text artifact.
//!
//! Options:
//!   -c, --config <FILE>       Base configuration (TOML format)
//!   -s, --set <KEY=VALUE>     Override applied to every created artifact
//!   -u, --update <KEY=VALUE>  Re-render the selected artifacts after creation
//!   -f, --family <NAME>       Restrict updates and output to one family
//!   -l, --list                List catalog keys and sizes instead of SVG
//!   -h, --help                Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use thiserror::Error;

use textbox_catalog::{
    Error, Manager, Overrides, RenderConfig, SvgBackend, SvgOptions, SvgSurface, Value,
};

#[derive(Parser)]
#[command(name = "textbox-catalog")]
#[command(about = "Render text lines to SVG and catalog them by name")]
struct Cli {
    /// Input file, one text per line (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Base configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override applied to every created artifact
    #[arg(short, long, value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Override applied to the selected artifacts after creation
    #[arg(short, long, value_name = "KEY=VALUE")]
    update: Vec<String>,

    /// Restrict updates and output to one family (a text or a catalog key)
    #[arg(short, long)]
    family: Option<String>,

    /// List catalog keys and sizes instead of printing SVG
    #[arg(short, long)]
    list: bool,

    /// Include the XML declaration in each SVG document
    #[arg(long)]
    standalone: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Error reading '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error reading from stdin: {0}")]
    Stdin(io::Error),

    #[error("{0}")]
    Config(String),

    #[error("Invalid override '{0}': expected KEY=VALUE")]
    Assignment(String),

    #[error("Error: {0}")]
    Catalog(#[from] Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // No input file and an interactive stdin: nothing to read
    if cli.input.is_none() && io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let base = match &cli.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    let backend = SvgBackend::with_options(SvgOptions::new().with_standalone(cli.standalone));
    let mut manager = Manager::new(backend, base)?;

    let create_overrides = parse_overrides(&cli.set)?;
    for line in read_input(cli.input.as_deref())?.lines() {
        let text = line.trim_end();
        if text.is_empty() {
            continue;
        }
        manager.create(text, &create_overrides)?;
    }

    if !cli.update.is_empty() {
        let update_overrides = parse_overrides(&cli.update)?;
        let keys = manager.update(cli.family.as_deref(), true, &update_overrides)?;
        log::info!("updated {} artifact(s)", keys.len());
    }

    print_catalog(&manager, cli.family.as_deref(), cli.list);
    Ok(())
}

fn load_config(path: &Path) -> Result<RenderConfig, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    RenderConfig::from_toml_str(&source)
        .map_err(|e| CliError::Config(e.format(&source, &path.display().to_string())))
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Stdin)?;
            Ok(buffer)
        }
    }
}

fn parse_overrides(assignments: &[String]) -> Result<Overrides, CliError> {
    let mut overrides = Overrides::new();
    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| CliError::Assignment(assignment.clone()))?;
        overrides.set(key.trim(), Value::parse_literal(value))?;
    }
    Ok(overrides)
}

fn print_catalog(manager: &Manager<SvgBackend>, family: Option<&str>, list: bool) {
    let entries: Vec<(&str, &SvgSurface)> = match family {
        Some(name) => {
            let name = manager
                .get(name)
                .map(|artifact| artifact.text())
                .unwrap_or(name);
            manager
                .family(name)
                .iter()
                .map(|(key, artifact)| (key, artifact.surface()))
                .collect()
        }
        None => manager
            .iter()
            .map(|(key, artifact)| (key, artifact.surface()))
            .collect(),
    };

    for (key, surface) in entries {
        if list {
            println!("{}\t{}x{}", key, surface.width(), surface.height());
        } else {
            println!("<!-- {} -->", key);
            println!("{}", surface.markup());
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
//
//! dreux_compute — CLI binary for a full Dreux-Gorisse design evaluation
//!
//! Reads a JSON design from --json, --input <FILE> or stdin (`--input -`), runs
//! the DreuxKernel pipeline and prints `{"result": ..., "events": [...]}`.
//! Every part of the document is optional; with no input at all the built-in
//! reference design (sand 0/4 + gravel 4/20) is computed.
//!
//! Usage:
//!   dreux_compute --json '{"aggregates":[...],"params":{...},"config":{"fallbackDmax":25}}'
//!   cat design.json | dreux_compute --input - --pretty
//!
//! Logging goes to stderr, filtered by RUST_LOG (default info for this crate).

use clap::Parser;
use serde::Deserialize;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dreux_core::{Aggregate, DreuxConfig, DreuxKernel, FormulationParams, MixDesign, Result};

#[derive(Parser, Debug)]
#[command(name = "dreux_compute", about = "Dreux-Gorisse concrete mix design")]
struct Cli {
    /// Design document as an inline JSON string
    #[arg(long, conflicts_with = "input")]
    json: Option<String>,

    /// Design document file, or `-` for stdin
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Deserialize, Default)]
struct DesignDocument {
    aggregates: Option<Vec<Aggregate>>,
    params: Option<FormulationParams>,
    #[serde(default)]
    config: DreuxConfig,
}

impl DesignDocument {
    /// Missing parts are taken from the reference design
    fn into_design(self) -> (MixDesign, DreuxConfig) {
        let reference = MixDesign::default();
        let design = MixDesign {
            aggregates: self.aggregates.unwrap_or(reference.aggregates),
            params: self.params.unwrap_or(reference.params),
        };
        (design, self.config)
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "dreux_core=debug,dreux_compute=debug"
    } else {
        "dreux_core=info,dreux_compute=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn read_input(cli: &Cli) -> Result<Option<String>> {
    if let Some(json) = &cli.json {
        return Ok(Some(json.clone()));
    }
    match &cli.input {
        Some(path) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

fn run(cli: &Cli) -> Result<String> {
    let document = match read_input(cli)? {
        Some(text) => serde_json::from_str::<DesignDocument>(&text)?,
        None => {
            info!("no input given, computing the reference design");
            DesignDocument::default()
        }
    };

    let (design, config) = document.into_design();
    let response = DreuxKernel::run(&design, &config);
    info!(
        dmax = response.result.dmax,
        events = response.events.len(),
        "design computed"
    );

    let out = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(out)
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

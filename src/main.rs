// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Slotroute CLI entrypoint.
//!
//! Every command loads the route file through the same load-time repair the editor uses, so the
//! output always reflects a document with a `start` slot and a resolvable pre-start location.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use slotroute::model::{Meta, RouteDocument};
use slotroute::query::{
    counts_by_slot, marker_label, marker_style, unlock_cycles, unlock_edges,
};
use slotroute::store::{RouteFile, WriteDurability};
use slotroute::sync::{reconcile_start_slot, StartSlotSync};
use slotroute::validate::{validate, Severity};

#[derive(Debug, Parser)]
#[command(name = "slotroute", version, about = "Check and repair slot-based route documents")]
struct Cli {
    /// Flush writes to stable storage where supported (slower)
    #[arg(long, global = true)]
    durable_writes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print validation findings; exits with status 1 if there are errors
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reconcile the start slot, start location and meeting point, then write the result
    Sync {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write to this file instead of overwriting FILE
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Rebuild the start location from the meeting point and overwrite the meeting point
        /// position from it
        #[arg(long)]
        regenerate: bool,
    },
    /// Write a fresh default route
    New {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// Print location counts per slot and the unlock edges between placed locations
    Groups {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn route_file(path: PathBuf, durable_writes: bool) -> RouteFile {
    let file = RouteFile::new(path);
    if durable_writes {
        file.with_durability(WriteDurability::Durable)
    } else {
        file
    }
}

/// Returns whether the command succeeded in the domain sense (no validation errors).
fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    match cli.command {
        Command::Validate { file, json } => {
            let doc = route_file(file, cli.durable_writes).load()?;
            let report = validate(&doc);
            if json {
                let out = json!({
                    "valid": report.is_valid(),
                    "errors": report.messages(Severity::Error),
                    "warnings": report.messages(Severity::Warning),
                    "oks": report.messages(Severity::Ok),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for finding in report.findings() {
                    println!("{}: {finding}", finding.severity().as_str());
                }
            }
            Ok(report.is_valid())
        }
        Command::Sync {
            file,
            out,
            regenerate,
        } => {
            let source = route_file(file.clone(), cli.durable_writes);
            let mut doc = source.load()?;
            let strategy = if regenerate {
                StartSlotSync::Regenerate
            } else {
                StartSlotSync::FillGaps
            };
            let changed = reconcile_start_slot(&mut doc, strategy);
            let target = route_file(out.unwrap_or(file), cli.durable_writes);
            target.save(&doc)?;
            println!(
                "{} {}",
                target.path().display(),
                if changed { "updated" } else { "written" }
            );
            Ok(true)
        }
        Command::New { file, title } => {
            if file.exists() {
                return Err(format!("{} already exists", file.display()).into());
            }
            let mut doc = RouteDocument::new();
            if let Some(title) = title {
                doc.meta = Meta::titled(title);
            }
            route_file(file, cli.durable_writes).save(&doc)?;
            Ok(true)
        }
        Command::Groups { file } => {
            let doc = route_file(file, cli.durable_writes).load()?;
            let counts = counts_by_slot(&doc);
            for slot in &doc.slots {
                let count = counts.get(&slot.id).copied().unwrap_or(0);
                let required = if slot.required { "required" } else { "optional" };
                println!("{}\t{count}\t{required}", slot.id);
            }
            for location in &doc.locations {
                let style = marker_style(&doc, &counts, location);
                println!("  {}\t{}", marker_label(&counts, location), style.as_str());
            }
            for edge in unlock_edges(&doc) {
                println!(
                    "{} -> {}\t{} -> {}",
                    edge.from_slot, edge.to_slot, edge.from.id, edge.to.id
                );
            }
            for cycle in unlock_cycles(&doc) {
                let ids = cycle.iter().map(|id| id.as_str()).collect::<Vec<_>>();
                println!("cycle\t{}", ids.join(", "));
            }
            Ok(true)
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("slotroute: {err}");
            std::process::exit(1);
        }
    }
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! ROOMAP command-line tool.
//!
//! Inspects persisted maps, previews save batches and converts geometry
//! between a background image and its displayed size.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roomap::io::{media, serialization};
use roomap::io::serialization::Format;
use roomap::save::{build_batch, get_objects_to_save, PendingEdits, SaveFilter};
use roomap::{CoordinateSystem, LayoutConfig, MapObjectStore, SizePair};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "roomap")]
#[command(about = "Room map layout engine tools")]
struct Cli {
    /// Layout settings file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a persisted map and print its object list
    Assemble {
        /// Persisted map file
        #[arg(long)]
        map: PathBuf,

        /// Output format: json or yaml
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Print the save batch for a map and its pending edits
    Batch {
        /// Persisted map file
        #[arg(long)]
        map: PathBuf,

        /// Pending edits file keyed by object id
        #[arg(long)]
        edits: Option<PathBuf>,

        /// Extra save items appended to the batch
        #[arg(long)]
        extra: Option<PathBuf>,

        /// Allow-list entries: type names, ids, or !<id> to exclude
        #[arg(long, value_delimiter = ',')]
        include: Vec<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a size or position between real and displayed space
    Convert {
        /// Background image defining the real space
        #[arg(long, conflicts_with = "real")]
        image: Option<PathBuf>,

        /// Real space as WIDTHxHEIGHT
        #[arg(long)]
        real: Option<String>,

        /// Displayed space as WIDTHxHEIGHT
        #[arg(long)]
        displayed: String,

        /// Object size as WIDTHxHEIGHT, in the source space
        #[arg(long)]
        size: String,

        /// Object top-left position as X,Y, in the source space
        #[arg(long)]
        position: Option<String>,

        /// Convert from displayed to real instead
        #[arg(long)]
        to_real: bool,
    },
}

fn parse_pair(text: &str, separator: char) -> Result<(f64, f64)> {
    let (a, b) = text
        .split_once(separator)
        .with_context(|| format!("Expected two numbers separated by '{}': {}", separator, text))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}

fn parse_size(text: &str) -> Result<SizePair> {
    let (width, height) = parse_pair(text, 'x')?;
    Ok(SizePair::new(width, height))
}

fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(path) => serialization::import_config(path),
        None => Ok(LayoutConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Assemble { map, format } => {
            let persisted = serialization::import_map(&map)?;
            let store = MapObjectStore::from_persisted(&persisted);
            let format = match format.as_str() {
                "yaml" | "yml" => Format::Yaml,
                _ => Format::Json,
            };
            println!("{}", serialization::to_string(&store.objects(), format)?);
        }
        Command::Batch {
            map,
            edits,
            extra,
            include,
            output,
        } => {
            let persisted = serialization::import_map(&map)?;
            let store = MapObjectStore::from_persisted(&persisted);
            let edits = match edits {
                Some(path) => serialization::import_edits(&path)?,
                None => PendingEdits::new(),
            };
            let extra = match extra {
                Some(path) => serialization::import_batch(&path)?,
                None => Vec::new(),
            };
            let filter = SaveFilter::parse(&include)?;

            let collected = get_objects_to_save(store.objects(), &edits, &filter);
            let batch = build_batch(collected, extra);
            log::info!("Prepared batch of {} object(s)", batch.len());

            match output {
                Some(path) => serialization::export_batch(&batch, &path)?,
                None => println!("{}", serialization::to_string(&batch, Format::Json)?),
            }
        }
        Command::Convert {
            image,
            real,
            displayed,
            size,
            position,
            to_real,
        } => {
            let real = match (image, real) {
                (Some(path), _) => media::background_real_space(&path)?,
                (None, Some(text)) => parse_size(&text)?,
                (None, None) => anyhow::bail!("Either --image or --real is required"),
            };
            let spaces = CoordinateSystem::new(real, parse_size(&displayed)?)
                .with_indent_fraction(config.indent_fraction);
            let object = parse_size(&size)?;

            let converted = if to_real {
                spaces.size_to_real(object.width, object.height)
            } else {
                spaces.size_to_displayed(object.width, object.height)
            };
            println!(
                "size: {}x{}{}",
                converted.value.width,
                converted.value.height,
                if converted.corrected { " (clamped)" } else { "" }
            );

            if let Some(text) = position {
                let (x, y) = parse_pair(&text, ',')?;
                let moved = if to_real {
                    spaces.position_to_real(x, y, converted.value)
                } else {
                    spaces.position_to_displayed(x, y, converted.value)
                };
                println!(
                    "position: {},{}{}",
                    moved.value.x,
                    moved.value.y,
                    if moved.corrected { " (clamped)" } else { "" }
                );
            }
        }
    }

    Ok(())
}

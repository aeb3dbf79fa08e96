//! `cutstock quote` command - cost quoting for single lines and batches

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::helpers::{load_catalog, parse_date};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::engine::cost;
use crate::entities::order::OrderLine;

#[derive(Subcommand, Debug)]
pub enum QuoteCommands {
    /// Quote a single order line
    Line(LineArgs),

    /// Quote a CSV batch of order lines
    Batch(BatchArgs),
}

#[derive(clap::Args, Debug)]
pub struct LineArgs {
    /// Part type name
    #[arg(long, short = 'p')]
    pub part: String,

    /// Material id (MAT-...) or unique name fragment
    #[arg(long, short = 'm')]
    pub material: String,

    /// Shorthand measurement text
    #[arg(long, short = 't')]
    pub text: String,

    /// Number of parts
    #[arg(long, short = 'n', default_value = "1")]
    pub quantity: u32,

    /// Pricing reference date (YYYY-MM-DD); omit for the best current price
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// Input CSV with columns part_type,material,measurements,quantity[,date]
    pub input: PathBuf,

    /// Output CSV path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Pricing reference date applied to rows without their own
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

pub fn run(cmd: QuoteCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;

    match cmd {
        QuoteCommands::Line(args) => {
            let Some(material) = catalog.find_material(&args.material) else {
                return Err(miette::miette!(
                    "No material matching '{}' (use the full MAT id or a unique name fragment)",
                    args.material
                ));
            };

            let mut line = OrderLine::new(
                args.part.clone(),
                material.id.clone(),
                config.author_or_default(),
            );
            line.measurement_text = args.text.clone();
            line.quantity = args.quantity;
            line.reference_date = args.date;
            line.recompute(&catalog, &catalog, &catalog);

            match global.format.resolve(config.default_format.as_deref()) {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&line.cost).into_diagnostic()?
                    );
                }
                _ => {
                    let c = &line.cost;
                    println!("{} {}", style("Part type:").bold(), args.part);
                    println!(
                        "{} {} ({})",
                        style("Material:").bold(),
                        material.name,
                        material.id
                    );
                    println!("{} {}", style("Measurements:").bold(), args.text);
                    println!("{} {} mm³", style("Unit volume:").bold(), c.unit_volume);
                    println!("{} {:.3} kg", style("Unit weight:").bold(), c.unit_weight);
                    println!("{} {}", style("Quantity:").bold(), c.quantity);
                    println!("{} {:.3} kg", style("Total weight:").bold(), c.total_weight);
                    println!("{} {:.2}/kg", style("Unit price:").bold(), c.unit_price);
                    println!("{} {:.2}", style("Total price:").bold(), c.total_price);
                }
            }
            Ok(())
        }
        QuoteCommands::Batch(args) => run_batch(args, &catalog, global),
    }
}

/// One input row of a batch quote
#[derive(Debug, Deserialize)]
struct BatchRow {
    part_type: String,
    material: String,
    measurements: String,
    quantity: u32,
    #[serde(default)]
    date: Option<NaiveDate>,
}

/// One output row: the input echoed back with the computed figures
#[derive(Debug, Serialize)]
struct BatchResult {
    part_type: String,
    material: String,
    measurements: String,
    quantity: u32,
    unit_weight: f64,
    total_weight: f64,
    unit_price: f64,
    total_price: f64,
}

fn run_batch(args: BatchArgs, catalog: &crate::core::catalog::Catalog, global: &GlobalOpts) -> Result<()> {
    let mut reader = csv::Reader::from_path(&args.input).into_diagnostic()?;

    let mut writer: csv::Writer<Box<dyn std::io::Write>> = match &args.output {
        Some(path) => csv::Writer::from_writer(Box::new(
            std::fs::File::create(path).into_diagnostic()?,
        )),
        None => csv::Writer::from_writer(Box::new(std::io::stdout())),
    };

    let mut count = 0usize;
    for record in reader.deserialize() {
        let row: BatchRow = record.into_diagnostic()?;
        let material = catalog.find_material(&row.material);
        if material.is_none() && !global.quiet {
            eprintln!(
                "{} unknown material '{}', using steel density and no price",
                style("!").yellow(),
                row.material
            );
        }

        let computed = cost::compute_line(
            catalog,
            catalog,
            catalog,
            &row.part_type,
            material.map(|m| &m.id),
            &row.measurements,
            row.quantity,
            row.date.or(args.date),
        );

        writer
            .serialize(BatchResult {
                part_type: row.part_type,
                material: row.material,
                measurements: row.measurements,
                quantity: row.quantity,
                unit_weight: computed.unit_weight,
                total_weight: computed.total_weight,
                unit_price: computed.unit_price,
                total_price: computed.total_price,
            })
            .into_diagnostic()?;
        count += 1;
    }
    writer.flush().into_diagnostic()?;

    if !global.quiet {
        eprintln!("{} {} line(s) quoted", style("✓").green(), count);
    }
    Ok(())
}

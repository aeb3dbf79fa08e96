//! `cutstock measure` command - shorthand ⇄ structured measurements

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::load_catalog;
use crate::cli::table::Table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::PartTypeSource;
use crate::core::config::Config;
use crate::engine::measure::{Dimension, MeasurementSet};
use crate::engine::notation;

#[derive(Subcommand, Debug)]
pub enum MeasureCommands {
    /// Decode shorthand text into named measurements
    Decode(DecodeArgs),

    /// Encode named measurements as shorthand text
    Encode(EncodeArgs),
}

#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    /// Part type name (selects the grammar)
    pub part_type: String,

    /// Shorthand text (e.g. "100*50*10", "φ20*30")
    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    /// Part type name (selects the grammar)
    pub part_type: String,

    /// Measurement as NAME=VALUE (repeatable, e.g. --dim length=100)
    #[arg(long = "dim", value_name = "NAME=VALUE")]
    pub dims: Vec<String>,
}

pub fn run(cmd: MeasureCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    match cmd {
        MeasureCommands::Decode(args) => {
            let measurements = notation::decode(&args.text, &args.part_type);

            if measurements.is_empty() && !global.quiet {
                let hint = load_catalog(global, &config)?
                    .part_type(&args.part_type)
                    .map(|pt| pt.input_hint.clone());
                let mut message = format!(
                    "'{}' does not match the {} grammar",
                    args.text, args.part_type
                );
                if let Some(hint) = hint {
                    message.push_str(&format!(" (expected {})", hint));
                }
                eprintln!("{} {}", style("!").yellow(), message);
            }

            match global.format.resolve(config.default_format.as_deref()) {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&measurements).ok().unwrap_or_else(|| "{}".to_string()));
                }
                format => {
                    let mut table = Table::new(vec!["KEY", "VALUE"]);
                    for (key, value) in measurements.iter() {
                        table.row(vec![key.clone(), value.to_string()]);
                    }
                    table.print(format, global.quiet, "measurement");
                }
            }
            Ok(())
        }
        MeasureCommands::Encode(args) => {
            let mut measurements = MeasurementSet::new();
            for pair in &args.dims {
                let Some((name, value)) = pair.split_once('=') else {
                    return Err(miette::miette!(
                        "Invalid measurement '{}'. Expected NAME=VALUE",
                        pair
                    ));
                };
                let dim: Dimension = name
                    .parse()
                    .map_err(|e: String| miette::miette!("{}", e))?;
                let value: f64 = value
                    .parse()
                    .map_err(|_| miette::miette!("Invalid value '{}' for {}", value, name))?;
                measurements.set(dim, value);
            }

            let text = notation::encode(&measurements, &args.part_type);
            if text.is_empty() && !global.quiet {
                eprintln!(
                    "{} missing dimensions for the {} grammar, nothing encoded",
                    style("!").yellow(),
                    args.part_type
                );
            }
            println!("{}", text);
            Ok(())
        }
    }
}

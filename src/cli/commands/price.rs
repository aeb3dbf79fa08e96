//! `cutstock price` command - price history and resolution

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_catalog, parse_date, truncate_str};
use crate::cli::table::Table;
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::engine::pricing::resolve_unit_price;

#[derive(Subcommand, Debug)]
pub enum PriceCommands {
    /// List a material's price history
    List(ListArgs),

    /// Resolve the unit price applicable on a date
    Resolve(ResolveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Material id (MAT-...) or unique name fragment
    pub material: String,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Material id (MAT-...) or unique name fragment
    pub material: String,

    /// Reference date (YYYY-MM-DD); omit for the best current price
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

pub fn run(cmd: PriceCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;
    let format = global.format.resolve(config.default_format.as_deref());

    match cmd {
        PriceCommands::List(args) => {
            let Some(mat) = catalog.find_material(&args.material) else {
                return Err(miette::miette!("No material matching '{}'", args.material));
            };

            use crate::core::catalog::PriceSource;
            let mut table = Table::new(vec!["PRICE", "FROM", "TO", "NOTE"]);
            for rec in catalog.price_history(&mat.id) {
                table.row(vec![
                    format!("{:.2}", rec.unit_price),
                    rec.effective_start.to_string(),
                    rec.effective_end
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "open".to_string()),
                    truncate_str(rec.note.as_deref().unwrap_or_default(), 40),
                ]);
            }
            table.print(format, global.quiet, "price record");
            Ok(())
        }
        PriceCommands::Resolve(args) => {
            let Some(mat) = catalog.find_material(&args.material) else {
                return Err(miette::miette!("No material matching '{}'", args.material));
            };

            use crate::core::catalog::PriceSource;
            let price = resolve_unit_price(catalog.price_history(&mat.id), args.date);

            if global.quiet {
                println!("{:.2}", price);
            } else {
                let when = args
                    .date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "current".to_string());
                println!(
                    "{} {:.2}/kg ({}, {})",
                    style("Unit price:").bold(),
                    price,
                    mat.name,
                    when
                );
            }
            Ok(())
        }
    }
}

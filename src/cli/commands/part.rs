//! `cutstock part` command - part type catalog

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::load_catalog;
use crate::cli::table::Table;
use crate::cli::GlobalOpts;
use crate::core::catalog::PartTypeSource;
use crate::core::config::Config;

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List part types
    List(ListArgs),

    /// Show a part type's details
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in name
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part type name (e.g. plate, round-bar)
    pub name: String,
}

pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;
    let format = global.format.resolve(config.default_format.as_deref());

    match cmd {
        PartCommands::List(args) => {
            let mut table = Table::new(vec!["NAME", "HINT", "VARIABLES", "STATUS"]);
            for pt in catalog.part_types() {
                if let Some(search) = &args.search {
                    if !pt.name.contains(search.as_str()) {
                        continue;
                    }
                }
                let variables = pt
                    .variables()
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                table.row(vec![
                    pt.name.clone(),
                    pt.input_hint.clone(),
                    variables,
                    pt.status.to_string(),
                ]);
            }
            table.print(format, global.quiet, "part type");
            Ok(())
        }
        PartCommands::Show(args) => {
            let Some(pt) = catalog.part_type(&args.name) else {
                return Err(miette::miette!("No part type named '{}'", args.name));
            };

            println!("{} {}", style("Name:").bold(), pt.name);
            println!("{} {}", style("Input hint:").bold(), pt.input_hint);
            println!("{} {}", style("Formula:").bold(), pt.volume_formula);
            let variables = pt
                .variables()
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("{} {}", style("Variables:").bold(), variables);
            if let Some(desc) = &pt.description {
                println!("{} {}", style("Description:").bold(), desc);
            }
            println!("{} {}", style("Status:").bold(), pt.status);
            Ok(())
        }
    }
}

//! `cutstock mat` command - material catalog

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{format_short_id, load_catalog};
use crate::cli::table::Table;
use crate::cli::GlobalOpts;
use crate::core::config::Config;

#[derive(Subcommand, Debug)]
pub enum MatCommands {
    /// List materials
    List(ListArgs),

    /// Show a material's details
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
    /// Material id (MAT-...) or unique name fragment
    pub material: String,
}

pub fn run(cmd: MatCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;
    let format = global.format.resolve(config.default_format.as_deref());

    match cmd {
        MatCommands::List(args) => {
            let mut table = Table::new(vec!["ID", "NAME", "DENSITY", "STANDARD", "STATUS"]);
            for mat in catalog.materials() {
                if let Some(search) = &args.search {
                    if !mat.name.to_lowercase().contains(&search.to_lowercase()) {
                        continue;
                    }
                }
                table.row(vec![
                    format_short_id(&mat.id),
                    mat.name.clone(),
                    format!("{:.2}", mat.density_g_cm3),
                    mat.standard.clone().unwrap_or_default(),
                    mat.status.to_string(),
                ]);
            }
            table.print(format, global.quiet, "material");
            Ok(())
        }
        MatCommands::Show(args) => {
            let Some(mat) = catalog.find_material(&args.material) else {
                return Err(miette::miette!(
                    "No material matching '{}' (use the full MAT id or a unique name fragment)",
                    args.material
                ));
            };

            println!("{} {}", style("Id:").bold(), mat.id);
            println!("{} {}", style("Name:").bold(), mat.name);
            println!("{} {:.2} g/cm³", style("Density:").bold(), mat.density_g_cm3);
            if let Some(standard) = &mat.standard {
                println!("{} {}", style("Standard:").bold(), standard);
            }
            println!("{} {}", style("Status:").bold(), mat.status);
            println!(
                "{} {}",
                style("Created:").bold(),
                mat.created.format("%Y-%m-%d")
            );
            println!("{} {}", style("Author:").bold(), mat.author);
            Ok(())
        }
    }
}

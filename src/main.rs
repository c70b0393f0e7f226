use anyhow::Result;
use clap::Parser;
use evcatalog::cli::{Cli, Commands};
use evcatalog::commands::{compare::CompareArgs, list::ListConfig};
use evcatalog::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            data,
            search,
            make,
            features,
            sort,
            direction,
            format,
            verbosity,
        } => {
            init_tracing(verbosity);
            evcatalog::commands::list_vehicles(ListConfig {
                data,
                search,
                make,
                features,
                sort,
                direction: direction.map(Into::into),
                format,
            })
        }
        Commands::Compare {
            data,
            ids,
            width,
            height,
            format,
            verbosity,
        } => {
            init_tracing(verbosity);
            evcatalog::commands::compare_vehicles(CompareArgs {
                data,
                ids,
                width,
                height,
                format,
            })
        }
        Commands::Init { force } => {
            init_tracing(0);
            evcatalog::commands::init_config(force)
        }
    }
}

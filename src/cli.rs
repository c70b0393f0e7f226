use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "evcatalog")]
#[command(about = "Filter, sort and compare electric vehicle records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List vehicles after search, manufacturer, feature filters and sort
    List {
        /// Directory holding vehicles.json (and optionally makes.json, features.json)
        #[arg(long, env = "EVCATALOG_DATA")]
        data: PathBuf,

        /// Case-insensitive text search over make, model and submodel
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to one manufacturer, by name or slug
        #[arg(short, long)]
        make: Option<String>,

        /// Feature bucket as Category:Bucket (repeatable)
        #[arg(long = "feature", value_name = "CATEGORY:BUCKET")]
        features: Vec<String>,

        /// Sort field (name, price, range, battery, acceleration, top-speed, rating, released)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction
        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Compare selected vehicles side by side
    Compare {
        /// Directory holding vehicles.json and details.json
        #[arg(long, env = "EVCATALOG_DATA")]
        data: PathBuf,

        /// Vehicle ids in selection order
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u32>,

        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Viewport height in pixels
        #[arg(long, default_value = "800")]
        height: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize an .evcatalog.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for crate::sort::SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => Self::Ascending,
            DirectionArg::Desc => Self::Descending,
        }
    }
}

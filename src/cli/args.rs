use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "archive-coords")]
#[command(about = "Coordinate conversion and frame search queries for image archives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert right ascension values (HH:MM:SS) to decimal degrees
    Ra {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Convert declination values (+DD:MM:SS) to decimal degrees
    Dec {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Strictly parse a position and show it in every notation
    Parse {
        #[arg(long, allow_hyphen_values = true, help = "Right ascension, sexagesimal or degrees")]
        ra: String,

        #[arg(long, allow_hyphen_values = true, help = "Declination, sexagesimal or degrees")]
        dec: String,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Build the frames-listing query for a set of search filters
    Query(QueryArgs),

    /// Angular separation between two positions
    Separation {
        #[arg(allow_hyphen_values = true)]
        ra1: String,

        #[arg(allow_hyphen_values = true)]
        dec1: String,

        #[arg(allow_hyphen_values = true)]
        ra2: String,

        #[arg(allow_hyphen_values = true)]
        dec2: String,
    },
}

#[derive(Args)]
pub struct QueryArgs {
    #[arg(long, allow_hyphen_values = true, default_value = "")]
    pub ra: String,

    #[arg(long, allow_hyphen_values = true, default_value = "")]
    pub dec: String,

    #[arg(long, default_value = "")]
    pub object: String,

    #[arg(long, default_value = "ALL")]
    pub imagetype: String,

    #[arg(long, default_value = "ALL", help = "Binning as NxM")]
    pub binning: String,

    #[arg(long, default_value = "ALL")]
    pub site: String,

    #[arg(long, default_value = "ALL")]
    pub telescope: String,

    #[arg(long, default_value = "ALL")]
    pub instrument: String,

    #[arg(long, default_value = "ALL")]
    pub filter: String,

    #[arg(long, default_value = "ALL", help = "Reduction level")]
    pub rlevel: String,

    #[arg(long, default_value = "", help = "Minimum exposure time in seconds")]
    pub exptime: String,

    #[arg(long, default_value = "")]
    pub basename: String,

    #[arg(long, default_value = "", help = "Request number")]
    pub reqnum: String,

    #[arg(long, help = "Night as YYYY-MM-DD")]
    pub night: Option<String>,

    #[arg(long, help = "Range start as 'YYYY-MM-DD HH:MM'")]
    pub start: Option<String>,

    #[arg(long, help = "Range end as 'YYYY-MM-DD HH:MM'")]
    pub end: Option<String>,

    #[arg(long, default_value = "false", help = "Print parameters as JSON instead of a URL")]
    pub json: bool,
}

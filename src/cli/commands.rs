use serde::Serialize;
use tracing::{debug, info, warn, Level};

use crate::cli::args::{Cli, Commands, QueryArgs};
use crate::config::ArchiveConfig;
use crate::error::Result;
use crate::models::{FrameQuery, SkyPosition};
use crate::utils::coordinates::{
    decimal_to_sexagesimal_dec, decimal_to_sexagesimal_ra, format_degrees,
    sexagesimal_dec_to_decimal, sexagesimal_ra_to_decimal,
};

#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub ra_deg: String,
    pub dec_deg: String,
    pub ra_sexagesimal: String,
    pub dec_sexagesimal: String,
    pub unit_vector: [f64; 3],
}

impl PositionReport {
    pub fn new(position: &SkyPosition) -> Self {
        Self {
            ra_deg: format_degrees(position.ra),
            dec_deg: format_degrees(position.dec),
            ra_sexagesimal: decimal_to_sexagesimal_ra(position.ra),
            dec_sexagesimal: decimal_to_sexagesimal_dec(position.dec),
            unit_vector: position.unit_vector(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "RA:  {} ({})\nDec: {} ({})\nUnit vector: [{:.10}, {:.10}, {:.10}]",
            self.ra_deg,
            self.ra_sexagesimal,
            self.dec_deg,
            self.dec_sexagesimal,
            self.unit_vector[0],
            self.unit_vector[1],
            self.unit_vector[2]
        )
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build a frame query from command-line filters
pub fn build_query(args: &QueryArgs) -> Result<FrameQuery> {
    let mut query = FrameQuery::new()
        .with_position(&args.ra, &args.dec)
        .with_object(&args.object);

    query.image_type = args.imagetype.clone();
    query.binning = args.binning.clone();
    query.site = args.site.clone();
    query.telescope = args.telescope.clone();
    query.instrument = args.instrument.clone();
    query.filter = args.filter.clone();
    query.reduction_level = args.rlevel.clone();
    query.exposure_time = args.exptime.clone();
    query.basename = args.basename.clone();
    query.request_number = args.reqnum.clone();

    if let Some(night) = &args.night {
        query.night = Some(FrameQuery::parse_night(night)?);
    }
    if let Some(start) = &args.start {
        query.start = Some(FrameQuery::parse_range_bound(start)?);
    }
    if let Some(end) = &args.end {
        query.end = Some(FrameQuery::parse_range_bound(end)?);
    }

    query.validate_query()?;
    Ok(query)
}

/// Explain why a position typed into the query will not be searched as given
pub fn position_warning(query: &FrameQuery) -> Option<String> {
    let has_ra = !query.ra.trim().is_empty();
    let has_dec = !query.dec.trim().is_empty();

    match (has_ra, has_dec) {
        (false, false) => None,
        (true, false) => {
            Some("Declination missing; the archive ignores RA on its own".to_string())
        }
        (false, true) => {
            Some("Right ascension missing; the archive ignores DEC on its own".to_string())
        }
        (true, true) if query.sky_position().is_none() => Some(format!(
            "Position '{}' / '{}' is not a valid coordinate; sending it unchanged",
            query.ra, query.dec
        )),
        (true, true) => None,
    }
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Ra { values } => {
            for value in &values {
                let converted = sexagesimal_ra_to_decimal(value);
                if converted == *value {
                    debug!("Right ascension '{}' left unchanged", value);
                }
                println!("{}", converted);
            }
        }

        Commands::Dec { values } => {
            for value in &values {
                let converted = sexagesimal_dec_to_decimal(value);
                if converted == *value {
                    debug!("Declination '{}' left unchanged", value);
                }
                println!("{}", converted);
            }
        }

        Commands::Parse { ra, dec, json } => {
            let position = SkyPosition::parse(&ra, &dec)?;
            let report = PositionReport::new(&position);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.summary());
            }
        }

        Commands::Query(args) => {
            let config = ArchiveConfig::load(cli.config.as_deref())?;
            let query = build_query(&args)?;

            if let Some(warning) = position_warning(&query) {
                warn!("{}", warning);
            }
            info!("{} active filters", query.active_filters().len());

            if args.json {
                println!("{}", serde_json::to_string_pretty(&query.to_json())?);
            } else {
                println!("{}", query.to_url(&config)?);
            }
        }

        Commands::Separation {
            ra1,
            dec1,
            ra2,
            dec2,
        } => {
            let config = ArchiveConfig::load(cli.config.as_deref())?;
            let first = SkyPosition::parse(&ra1, &dec1)?;
            let second = SkyPosition::parse(&ra2, &dec2)?;

            let separation = first.angular_separation_deg(&second);
            let within = first.is_within(&second, config.search_radius_arcmin);

            println!("Separation: {} deg", format_degrees(separation));
            println!(
                "Within {} arcmin search radius: {}",
                config.search_radius_arcmin,
                if within { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

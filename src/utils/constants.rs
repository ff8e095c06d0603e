/// Fractional digits in every converted coordinate
pub const DECIMAL_PLACES: usize = 10;

/// Degrees per hour of right ascension
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Right ascension bounds
pub const RA_MAX_HOURS: f64 = 23.0;
pub const RA_MAX_DEGREES: f64 = 360.0;

/// Declination bounds
pub const DEC_MAX_DEGREES: f64 = 90.0;
pub const DEC_MAX_MINUTES: f64 = 59.0;
pub const DEC_MAX_SECONDS: f64 = 59.0;

/// Sexagesimal minute/second bounds for right ascension (exclusive)
pub const SEXAGESIMAL_LIMIT: f64 = 60.0;

/// Squared unit-vector distance used by the archive's position filter
/// (10 arcmin, squared, in degrees).
pub const LEGACY_CONE_THRESHOLD: f64 = 0.02778;

/// Query parameter values
pub const FILTER_ALL: &str = "ALL";
pub const FILTER_NONE: &str = "None";
pub const DATE_RANGE_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const NIGHT_FORMAT: &str = "%Y-%m-%d";

/// Configuration defaults
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_FRAMES_PATH: &str = "/frames/";
pub const DEFAULT_SEARCH_RADIUS_ARCMIN: f64 = 10.0;
pub const ENV_PREFIX: &str = "ARCHIVE_COORDS";

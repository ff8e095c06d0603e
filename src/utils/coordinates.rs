use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{CoordinateError, Result};
use crate::utils::constants::{
    DECIMAL_PLACES, DEC_MAX_DEGREES, DEC_MAX_MINUTES, DEC_MAX_SECONDS, DEGREES_PER_HOUR,
    RA_MAX_DEGREES, RA_MAX_HOURS, SEXAGESIMAL_LIMIT,
};

//                                  (    hh    ):(        mm        ): (  ss   )
static RA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]?[0-9]):([0-5]?[0-9][.0-9]*):?([.0-9]+)?$").expect("valid RA pattern")
});

//                                   ( +/- )(    dd    ):(        mm        ): (  ss   )
static DEC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-])?([0-9]?[0-9]):([0-5]?[0-9][.0-9]*):?([.0-9]+)?$")
        .expect("valid Dec pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    pub fn factor(self) -> f64 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }
}

/// Components of a sexagesimal coordinate as typed into a search form.
///
/// `whole` holds hours for right ascension and degrees for declination.
/// `seconds` is zero when the seconds group was omitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub sign: Sign,
    pub whole: u32,
    pub minutes: f64,
    pub seconds: f64,
}

impl Sexagesimal {
    /// Match `HH:MM[.f][:SS[.f]]` without applying any range checks.
    pub fn parse_ra(text: &str) -> Result<Self> {
        let caps = RA_PATTERN
            .captures(text)
            .ok_or_else(|| CoordinateError::InvalidFormat(text.to_string()))?;

        Self::from_captures(text, Sign::Plus, &caps, 1)
    }

    /// Match `[+|-]DD:MM[.f][:SS[.f]]` without applying any range checks.
    pub fn parse_dec(text: &str) -> Result<Self> {
        let caps = DEC_PATTERN
            .captures(text)
            .ok_or_else(|| CoordinateError::InvalidFormat(text.to_string()))?;

        let sign = match caps.get(1).map(|m| m.as_str()) {
            Some("-") => Sign::Minus,
            _ => Sign::Plus,
        };

        Self::from_captures(text, sign, &caps, 2)
    }

    fn from_captures(text: &str, sign: Sign, caps: &Captures<'_>, first: usize) -> Result<Self> {
        let invalid = || CoordinateError::InvalidFormat(text.to_string());

        let whole = caps[first].parse::<u32>().map_err(|_| invalid())?;
        let minutes = leading_float(&caps[first + 1]).ok_or_else(invalid)?;
        let seconds = match caps.get(first + 2) {
            Some(m) => leading_float(m.as_str()).ok_or_else(invalid)?,
            None => 0.0,
        };

        Ok(Self {
            sign,
            whole,
            minutes,
            seconds,
        })
    }

    pub fn validate_ra(&self) -> Result<()> {
        check_bound("Hours", self.whole as f64, 0.0, RA_MAX_HOURS, true)?;
        check_bound("Minutes", self.minutes, 0.0, SEXAGESIMAL_LIMIT, false)?;
        check_bound("Seconds", self.seconds, 0.0, SEXAGESIMAL_LIMIT, false)
    }

    pub fn validate_dec(&self) -> Result<()> {
        check_bound("Degrees", self.whole as f64, 0.0, DEC_MAX_DEGREES, true)?;
        check_bound("Minutes", self.minutes, 0.0, DEC_MAX_MINUTES, true)?;
        check_bound("Seconds", self.seconds, 0.0, DEC_MAX_SECONDS, true)
    }

    fn magnitude(&self) -> f64 {
        self.whole as f64 + self.minutes / 60.0 + self.seconds / 3600.0
    }

    /// Right ascension in decimal degrees.
    pub fn ra_degrees(&self) -> f64 {
        DEGREES_PER_HOUR * self.magnitude()
    }

    /// Declination in decimal degrees. The sign applies to the summed magnitude.
    pub fn dec_degrees(&self) -> f64 {
        self.sign.factor() * self.magnitude()
    }
}

/// Read the longest `digits[.digits]` prefix, the way a lenient float reader would.
/// `"30.5.1"` reads as 30.5; text without a leading number reads as nothing.
fn leading_float(text: &str) -> Option<f64> {
    let int_len = text.bytes().take_while(u8::is_ascii_digit).count();
    let mut end = int_len;

    if text[int_len..].starts_with('.') {
        let frac_len = text[int_len + 1..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if frac_len > 0 {
            end = int_len + 1 + frac_len;
        }
    }

    if end == 0 {
        return None;
    }

    text[..end].parse::<f64>().ok()
}

fn check_bound(
    component: &'static str,
    value: f64,
    min: f64,
    max: f64,
    inclusive_max: bool,
) -> Result<()> {
    let within = if inclusive_max {
        (min..=max).contains(&value)
    } else {
        (min..max).contains(&value)
    };

    if within {
        Ok(())
    } else {
        Err(CoordinateError::OutOfRange {
            component,
            value,
            min,
            max,
        })
    }
}

/// Parse a sexagesimal right ascension into decimal degrees.
pub fn parse_ra(ra: &str) -> Result<f64> {
    let parsed = Sexagesimal::parse_ra(ra)?;
    parsed.validate_ra()?;
    Ok(parsed.ra_degrees())
}

/// Parse a sexagesimal declination into decimal degrees.
pub fn parse_dec(dec: &str) -> Result<f64> {
    let parsed = Sexagesimal::parse_dec(dec)?;
    parsed.validate_dec()?;
    Ok(parsed.dec_degrees())
}

/// Fixed-point rendering with ten fractional digits. Zero never carries a minus sign.
///
/// Exact halfway cases round away from zero, so `0.00048828125` renders as `0.0004882813`.
pub fn format_degrees(degrees: f64) -> String {
    let Some(units) = fixed_point_units(degrees.abs()) else {
        let degrees = if degrees == 0.0 { 0.0 } else { degrees };
        return format!("{:.*}", DECIMAL_PLACES, degrees);
    };

    let sign = if degrees < 0.0 { "-" } else { "" };
    let scale = 10u128.pow(DECIMAL_PLACES as u32);

    format!(
        "{}{}.{:0width$}",
        sign,
        units / scale,
        units % scale,
        width = DECIMAL_PLACES
    )
}

/// `value × 10^DECIMAL_PLACES` rounded half up, computed on the exact binary value.
/// `None` for values too large or not finite.
fn fixed_point_units(value: f64) -> Option<u128> {
    if !value.is_finite() {
        return None;
    }

    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = (bits & ((1u64 << 52) - 1)) as u128;
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u128 << 52), biased - 1075)
    };

    let numerator = mantissa * 10u128.pow(DECIMAL_PLACES as u32);

    if exponent >= 0 {
        return if exponent <= 40 {
            Some(numerator << exponent)
        } else {
            None
        };
    }

    let shift = exponent.unsigned_abs();
    if shift >= 128 {
        return Some(0);
    }

    let quotient = numerator >> shift;
    let remainder = numerator & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);

    Some(if remainder >= half {
        quotient + 1
    } else {
        quotient
    })
}

/// Convert a sexagesimal right ascension to decimal degrees.
///
/// Input that does not match `HH:MM[:SS]` or fails a range check is returned unchanged.
///
/// # Examples
/// ```
/// use archive_coords::utils::sexagesimal_ra_to_decimal;
///
/// assert_eq!(sexagesimal_ra_to_decimal("10:30:00"), "157.5000000000");
/// assert_eq!(sexagesimal_ra_to_decimal("24:00:00"), "24:00:00");
/// ```
pub fn sexagesimal_ra_to_decimal(ra: &str) -> String {
    parse_ra(ra)
        .map(format_degrees)
        .unwrap_or_else(|_| ra.to_string())
}

/// Convert a sexagesimal declination to decimal degrees.
///
/// Input that does not match `[+|-]DD:MM[:SS]` or fails a range check is returned unchanged.
pub fn sexagesimal_dec_to_decimal(dec: &str) -> String {
    parse_dec(dec)
        .map(format_degrees)
        .unwrap_or_else(|_| dec.to_string())
}

/// Render decimal degrees as right ascension `HH:MM:SS.sss`
pub fn decimal_to_sexagesimal_ra(degrees: f64) -> String {
    const MILLIS_PER_DAY: u64 = 24 * 3_600_000;

    let hours = degrees.rem_euclid(RA_MAX_DEGREES) / DEGREES_PER_HOUR;
    let mut millis = (hours * 3_600_000.0).round() as u64;
    if millis >= MILLIS_PER_DAY {
        millis -= MILLIS_PER_DAY;
    }

    let h = millis / 3_600_000;
    let m = (millis / 60_000) % 60;
    let s = millis % 60_000;

    format!("{:02}:{:02}:{:02}.{:03}", h, m, s / 1000, s % 1000)
}

/// Render decimal degrees as declination `±DD:MM:SS.ss`
pub fn decimal_to_sexagesimal_dec(degrees: f64) -> String {
    let centi = (degrees.abs() * 360_000.0).round() as u64;
    let sign = if degrees < 0.0 && centi > 0 { "-" } else { "+" };

    let d = centi / 360_000;
    let m = (centi / 6_000) % 60;
    let s = centi % 6_000;

    format!("{}{:02}:{:02}:{:02}.{:02}", sign, d, m, s / 100, s % 100)
}

/// Parse right ascension that might be sexagesimal or already decimal degrees
pub fn parse_coordinate_ra(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    if trimmed.contains(':') {
        return parse_ra(trimmed);
    }

    let degrees = parse_decimal(trimmed)?;
    check_bound("Right ascension", degrees, 0.0, RA_MAX_DEGREES, false)?;
    Ok(degrees)
}

/// Parse declination that might be sexagesimal or already decimal degrees
pub fn parse_coordinate_dec(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    if trimmed.contains(':') {
        return parse_dec(trimmed);
    }

    let degrees = parse_decimal(trimmed)?;
    check_bound("Declination", degrees, -DEC_MAX_DEGREES, DEC_MAX_DEGREES, true)?;
    Ok(degrees)
}

fn parse_decimal(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CoordinateError::InvalidFormat(text.to_string()))
}

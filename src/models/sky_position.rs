use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::LEGACY_CONE_THRESHOLD;
use crate::utils::coordinates::{parse_coordinate_dec, parse_coordinate_ra};

/// Equatorial position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct SkyPosition {
    #[validate(range(min = 0.0, max = 360.0))]
    pub ra: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub dec: f64,
}

impl SkyPosition {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Build a position from form text, either sexagesimal or decimal degrees
    pub fn parse(ra: &str, dec: &str) -> Result<Self> {
        let position = Self::new(parse_coordinate_ra(ra)?, parse_coordinate_dec(dec)?);
        position.validate()?;
        Ok(position)
    }

    /// Cartesian unit vector `(cos δ cos α, cos δ sin α, sin δ)`
    pub fn unit_vector(&self) -> [f64; 3] {
        let ra = self.ra.to_radians();
        let dec = self.dec.to_radians();

        [dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin()]
    }

    /// Squared distance between the two unit vectors
    pub fn chord_distance_sq(&self, other: &SkyPosition) -> f64 {
        let a = self.unit_vector();
        let b = other.unit_vector();

        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }

    /// Great-circle separation in degrees, using the haversine formula
    pub fn angular_separation_deg(&self, other: &SkyPosition) -> f64 {
        let dec1 = self.dec.to_radians();
        let dec2 = other.dec.to_radians();
        let delta_dec = (other.dec - self.dec).to_radians();
        let delta_ra = (other.ra - self.ra).to_radians();

        let a = (delta_dec / 2.0).sin().powi(2)
            + dec1.cos() * dec2.cos() * (delta_ra / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        c.to_degrees()
    }

    pub fn is_within(&self, other: &SkyPosition, radius_arcmin: f64) -> bool {
        self.angular_separation_deg(other) * 60.0 <= radius_arcmin
    }

    /// The archive server's position filter: squared chord distance against a fixed threshold.
    /// The threshold is much wider than its nominal 10 arcmin.
    pub fn is_within_legacy_cone(&self, other: &SkyPosition) -> bool {
        self.chord_distance_sq(other) <= LEGACY_CONE_THRESHOLD
    }
}

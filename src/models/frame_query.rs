use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::config::ArchiveConfig;
use crate::error::{CoordinateError, Result};
use crate::models::SkyPosition;
use crate::utils::constants::{DATE_RANGE_FORMAT, FILTER_ALL, FILTER_NONE, NIGHT_FORMAT};
use crate::utils::coordinates::{sexagesimal_dec_to_decimal, sexagesimal_ra_to_decimal};

/// Select-box parameters; the archive ignores them when empty or `ALL`.
/// Every other parameter is ignored only when blank.
const SELECT_PARAMETERS: &[&str] = &[
    "IMAGETYPE",
    "binning",
    "SITE",
    "TELESCOPE",
    "INSTRUMENT",
    "FILTER",
    "RLEVEL",
];

/// How the `FILTER` parameter restricts frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelection {
    Any,
    /// Frames taken without a filter (`FILTER=None`)
    Unfiltered,
    Named(String),
}

/// Filter parameters sent by the search form to the frames-listing endpoint.
///
/// Select filters hold `"ALL"` when unset, text filters hold an empty string.
/// `ra` and `dec` keep the text exactly as typed; conversion happens when the
/// query parameters are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameQuery {
    pub image_type: String,
    pub binning: String,
    pub site: String,
    pub telescope: String,
    pub instrument: String,
    pub filter: String,
    pub reduction_level: String,
    pub exposure_time: String,
    pub object: String,
    pub ra: String,
    pub dec: String,
    pub basename: String,
    pub night: Option<NaiveDate>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub request_number: String,
}

impl Default for FrameQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameQuery {
    pub fn new() -> Self {
        Self {
            image_type: FILTER_ALL.to_string(),
            binning: FILTER_ALL.to_string(),
            site: FILTER_ALL.to_string(),
            telescope: FILTER_ALL.to_string(),
            instrument: FILTER_ALL.to_string(),
            filter: FILTER_ALL.to_string(),
            reduction_level: FILTER_ALL.to_string(),
            exposure_time: String::new(),
            object: String::new(),
            ra: String::new(),
            dec: String::new(),
            basename: String::new(),
            night: None,
            start: None,
            end: None,
            request_number: String::new(),
        }
    }

    pub fn with_position(mut self, ra: &str, dec: &str) -> Self {
        self.ra = ra.to_string();
        self.dec = dec.to_string();
        self
    }

    pub fn with_date_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_night(mut self, night: NaiveDate) -> Self {
        self.night = Some(night);
        self
    }

    pub fn with_object(mut self, object: &str) -> Self {
        self.object = object.to_string();
        self
    }

    /// Parse a `YYYY-MM-DD HH:MM` date-range bound
    pub fn parse_range_bound(text: &str) -> Result<NaiveDateTime> {
        Ok(NaiveDateTime::parse_from_str(text.trim(), DATE_RANGE_FORMAT)?)
    }

    /// Parse a `YYYY-MM-DD` night
    pub fn parse_night(text: &str) -> Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(text.trim(), NIGHT_FORMAT)?)
    }

    /// Check the parameters the archive would reject or misread
    pub fn validate_query(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(CoordinateError::InvalidParameter {
                    name: "end",
                    value: end.format(DATE_RANGE_FORMAT).to_string(),
                });
            }
        }

        if is_selected(&self.binning) && !is_binning(&self.binning) {
            return Err(CoordinateError::InvalidParameter {
                name: "binning",
                value: self.binning.clone(),
            });
        }

        if is_selected(&self.reduction_level)
            && self.reduction_level.trim().parse::<i32>().is_err()
        {
            return Err(CoordinateError::InvalidParameter {
                name: "RLEVEL",
                value: self.reduction_level.clone(),
            });
        }

        let exposure_time = self.exposure_time.trim();
        if !exposure_time.is_empty() {
            match exposure_time.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => {}
                _ => {
                    return Err(CoordinateError::InvalidParameter {
                        name: "EXPTIME",
                        value: self.exposure_time.clone(),
                    })
                }
            }
        }

        Ok(())
    }

    /// All parameters in the order the search form sends them
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("IMAGETYPE", self.image_type.clone()),
            ("binning", self.binning.clone()),
            ("SITE", self.site.clone()),
            ("TELESCOPE", self.telescope.clone()),
            ("INSTRUMENT", self.instrument.clone()),
            ("FILTER", self.filter.clone()),
            ("RLEVEL", self.reduction_level.clone()),
            ("EXPTIME", self.exposure_time.clone()),
            ("OBJECT", self.object.clone()),
            ("RA", sexagesimal_ra_to_decimal(&self.ra)),
            ("DEC", sexagesimal_dec_to_decimal(&self.dec)),
            ("basename", self.basename.clone()),
            ("night", format_optional(self.night.map(|d| d.format(NIGHT_FORMAT)))),
            ("start", format_optional(self.start.map(|d| d.format(DATE_RANGE_FORMAT)))),
            ("end", format_optional(self.end.map(|d| d.format(DATE_RANGE_FORMAT)))),
            ("REQNUM", self.request_number.clone()),
        ]
    }

    /// Only the parameters the archive applies as filters.
    /// A position is applied only when both RA and DEC are present.
    pub fn active_filters(&self) -> Vec<(&'static str, String)> {
        let has_position = !self.ra.trim().is_empty() && !self.dec.trim().is_empty();

        self.to_query_pairs()
            .into_iter()
            .filter(|(name, value)| {
                if matches!(*name, "RA" | "DEC") && !has_position {
                    return false;
                }
                if SELECT_PARAMETERS.contains(name) {
                    is_selected(value)
                } else {
                    !value.trim().is_empty()
                }
            })
            .collect()
    }

    pub fn filter_selection(&self) -> FilterSelection {
        match self.filter.as_str() {
            "" | FILTER_ALL => FilterSelection::Any,
            FILTER_NONE => FilterSelection::Unfiltered,
            name => FilterSelection::Named(name.to_string()),
        }
    }

    /// Position searched for, when both coordinates convert to valid decimals
    pub fn sky_position(&self) -> Option<SkyPosition> {
        let ra = sexagesimal_ra_to_decimal(&self.ra);
        let dec = sexagesimal_dec_to_decimal(&self.dec);
        SkyPosition::parse(&ra, &dec).ok()
    }

    /// Frames-listing URL carrying every query parameter
    pub fn to_url(&self, config: &ArchiveConfig) -> Result<Url> {
        let mut url = config.frames_url()?;
        url.query_pairs_mut().extend_pairs(self.to_query_pairs());

        debug!(url = %url, "Built frames query");
        Ok(url)
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .to_query_pairs()
            .into_iter()
            .map(|(name, value)| (name.to_string(), Value::String(value)))
            .collect();
        Value::Object(map)
    }
}

fn is_selected(value: &str) -> bool {
    !value.is_empty() && value != FILTER_ALL
}

fn is_binning(value: &str) -> bool {
    match value.trim().split_once('x') {
        Some((x, y)) => x.parse::<u32>().is_ok() && y.parse::<u32>().is_ok(),
        None => false,
    }
}

fn format_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair<'a>(pairs: &'a [(&'static str, String)], name: &str) -> &'a str {
        pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let pairs = FrameQuery::new().to_query_pairs();
        assert_eq!(pairs.len(), 16);
        assert_eq!(pair(&pairs, "IMAGETYPE"), "ALL");
        assert_eq!(pair(&pairs, "RLEVEL"), "ALL");
        assert_eq!(pair(&pairs, "OBJECT"), "");
        assert_eq!(pair(&pairs, "RA"), "");
        assert_eq!(pair(&pairs, "start"), "");
        assert!(FrameQuery::new().active_filters().is_empty());
    }

    #[test]
    fn test_position_is_converted() {
        let query = FrameQuery::new().with_position("10:30:00", "-45:30:00");
        let pairs = query.to_query_pairs();
        assert_eq!(pair(&pairs, "RA"), "157.5000000000");
        assert_eq!(pair(&pairs, "DEC"), "-45.5000000000");
    }

    #[test]
    fn test_invalid_position_passes_through() {
        let query = FrameQuery::new().with_position("24:00:00", "M31");
        let pairs = query.to_query_pairs();
        assert_eq!(pair(&pairs, "RA"), "24:00:00");
        assert_eq!(pair(&pairs, "DEC"), "M31");
        assert_eq!(query.sky_position(), None);
    }

    #[test]
    fn test_sky_position() {
        let query = FrameQuery::new().with_position("10:30:00", "45.5");
        assert_eq!(query.sky_position(), Some(SkyPosition::new(157.5, 45.5)));
    }

    #[test]
    fn test_dates() {
        let start = FrameQuery::parse_range_bound("2023-07-15 20:00").unwrap();
        let end = FrameQuery::parse_range_bound("2023-07-16 04:30").unwrap();
        let night = FrameQuery::parse_night("2023-07-15").unwrap();

        let query = FrameQuery::new()
            .with_date_range(start, end)
            .with_night(night);
        let pairs = query.to_query_pairs();
        assert_eq!(pair(&pairs, "start"), "2023-07-15 20:00");
        assert_eq!(pair(&pairs, "end"), "2023-07-16 04:30");
        assert_eq!(pair(&pairs, "night"), "2023-07-15");
        assert!(query.validate_query().is_ok());

        let reversed = FrameQuery::new().with_date_range(end, start);
        assert!(reversed.validate_query().is_err());

        assert!(FrameQuery::parse_range_bound("2023-07-15").is_err());
        assert!(FrameQuery::parse_night("15/07/2023").is_err());
    }

    #[test]
    fn test_active_filters() {
        let mut query = FrameQuery::new().with_object("M 31");
        query.site = "OCA".to_string();
        query.ra = "00:42:44".to_string();

        let active = query.active_filters();
        assert_eq!(
            active,
            vec![("SITE", "OCA".to_string()), ("OBJECT", "M 31".to_string())]
        );

        query.dec = "+41:16:09".to_string();
        let names: Vec<&str> = query.active_filters().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["SITE", "OBJECT", "RA", "DEC"]);
    }

    #[test]
    fn test_all_is_a_literal_for_text_filters() {
        let query = FrameQuery::new().with_object("ALL");
        assert_eq!(query.active_filters(), vec![("OBJECT", "ALL".to_string())]);

        let mut query = FrameQuery::new();
        query.basename = "ALL".to_string();
        query.request_number = "ALL".to_string();
        let names: Vec<&str> = query.active_filters().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["basename", "REQNUM"]);
    }

    #[test]
    fn test_blank_text_filters_are_inactive() {
        let mut query = FrameQuery::new().with_object("   ");
        query.exposure_time = " ".to_string();
        assert!(query.active_filters().is_empty());
    }

    #[test]
    fn test_select_filters_skip_all_and_empty() {
        let mut query = FrameQuery::new();
        query.site = String::new();
        query.telescope = FILTER_ALL.to_string();
        query.instrument = "SBIG".to_string();
        assert_eq!(
            query.active_filters(),
            vec![("INSTRUMENT", "SBIG".to_string())]
        );
    }

    #[test]
    fn test_filter_selection() {
        let mut query = FrameQuery::new();
        assert_eq!(query.filter_selection(), FilterSelection::Any);

        query.filter = FILTER_NONE.to_string();
        assert_eq!(query.filter_selection(), FilterSelection::Unfiltered);
        assert_eq!(query.active_filters(), vec![("FILTER", "None".to_string())]);

        query.filter = "Halpha".to_string();
        assert_eq!(
            query.filter_selection(),
            FilterSelection::Named("Halpha".to_string())
        );

        query.filter = String::new();
        assert_eq!(query.filter_selection(), FilterSelection::Any);
    }

    #[test]
    fn test_validate_query() {
        let mut query = FrameQuery::new();
        query.binning = "2x2".to_string();
        query.reduction_level = "1".to_string();
        query.exposure_time = "30".to_string();
        assert!(query.validate_query().is_ok());

        query.binning = "2by2".to_string();
        assert!(query.validate_query().is_err());

        query.binning = FILTER_ALL.to_string();
        query.reduction_level = "raw".to_string();
        assert!(query.validate_query().is_err());

        query.reduction_level = FILTER_ALL.to_string();
        query.exposure_time = "-1".to_string();
        assert!(query.validate_query().is_err());
    }

    #[test]
    fn test_to_url() {
        let query = FrameQuery::new()
            .with_position("10:30:00", "+45:30:00")
            .with_object("M 31");
        let url = query.to_url(&ArchiveConfig::default()).unwrap();

        assert_eq!(url.path(), "/frames/");
        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(params.len(), 16);
        assert!(params.contains(&("RA".to_string(), "157.5000000000".to_string())));
        assert!(params.contains(&("DEC".to_string(), "45.5000000000".to_string())));
        assert!(params.contains(&("OBJECT".to_string(), "M 31".to_string())));
    }

    #[test]
    fn test_to_json() {
        let json = FrameQuery::new().with_position("1:2:3", "").to_json();
        assert_eq!(json["RA"], "15.5125000000");
        assert_eq!(json["DEC"], "");
        assert_eq!(json["SITE"], "ALL");
    }
}

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use url::Url;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BASE_URL, DEFAULT_FRAMES_PATH, DEFAULT_SEARCH_RADIUS_ARCMIN, ENV_PREFIX,
};

/// Where the archive lives and how wide a position search is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ArchiveConfig {
    #[validate(length(min = 1))]
    pub base_url: String,

    pub frames_path: String,

    #[validate(range(exclusive_min = 0.0, max = 600.0))]
    pub search_radius_arcmin: f64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            frames_path: DEFAULT_FRAMES_PATH.to_string(),
            search_radius_arcmin: DEFAULT_SEARCH_RADIUS_ARCMIN,
        }
    }
}

impl ArchiveConfig {
    /// Layer defaults, an optional config file and `ARCHIVE_COORDS_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("frames_path", DEFAULT_FRAMES_PATH)?
            .set_default("search_radius_arcmin", DEFAULT_SEARCH_RADIUS_ARCMIN)?;

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ArchiveConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(
            base_url = %config.base_url,
            radius = config.search_radius_arcmin,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Absolute URL of the frames-listing endpoint
    pub fn frames_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?.join(&self.frames_path)?)
    }
}

use crate::domain::error::DomainError;
use crate::domain::values::deviation::BandThresholds;
use crate::domain::values::query_parameters::QueryParameters;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_RECOMMEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub catalog_url: String,
    pub recommend_url: String,
    pub page_size: u32,
    pub timeout: Duration,
    pub bands: BandThresholds,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.into(),
            recommend_url: DEFAULT_RECOMMEND_URL.into(),
            page_size: QueryParameters::DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bands: BandThresholds::default(),
        }
    }
}

impl BrowserConfig {
    /// Reads `SAKEBROWSE_*` variables, falling back to defaults for any
    /// that are unset.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let defaults = Self::default();

        let catalog_url = lookup("SAKEBROWSE_CATALOG_URL").unwrap_or(defaults.catalog_url);
        let recommend_url = lookup("SAKEBROWSE_RECOMMEND_URL").unwrap_or(defaults.recommend_url);
        let page_size: u32 = parse_var(&lookup, "SAKEBROWSE_PAGE_SIZE")?.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(DomainError::Config("SAKEBROWSE_PAGE_SIZE must be positive".into()));
        }
        let timeout = parse_var::<u64>(&lookup, "SAKEBROWSE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let close = parse_var(&lookup, "SAKEBROWSE_BAND_CLOSE")?.unwrap_or(defaults.bands.close);
        let moderate =
            parse_var(&lookup, "SAKEBROWSE_BAND_MODERATE")?.unwrap_or(defaults.bands.moderate);
        let bands = BandThresholds::new(close, moderate).map_err(DomainError::Config)?;

        Ok(Self {
            catalog_url,
            recommend_url,
            page_size,
            timeout,
            bands,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, DomainError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DomainError::Config(format!("{key}: cannot parse {raw:?}"))),
    }
}

use crate::error::ConfigError;

/// Built-in jurisdiction -> base API URL table.
const BASE_URLS: &[(&str, &str)] = &[(
    "oregon",
    "https://api.oregonlegislature.gov/odata/odataservice.svc/",
)];

/// Resolve the API base URL for a jurisdiction name.
pub fn base_url(jurisdiction: &str) -> Result<&'static str, ConfigError> {
    BASE_URLS
        .iter()
        .find(|(name, _)| *name == jurisdiction)
        .map(|(_, url)| *url)
        .ok_or_else(|| ConfigError::UnsupportedJurisdiction(jurisdiction.to_string()))
}

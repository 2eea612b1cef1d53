use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::jurisdiction;

/// Directory name used when no locality is configured.
pub const NO_CITY: &str = "no_city";

/// Where a run reads and writes: jurisdiction picks the API, the full tuple
/// picks the storage namespace. Same context, same directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationContext {
    pub jurisdiction: String,
    pub sub_jurisdiction: String,
    #[serde(default)]
    pub locality: Option<String>,
}

impl LocationContext {
    pub fn new(
        jurisdiction: impl Into<String>,
        sub_jurisdiction: impl Into<String>,
        locality: Option<String>,
    ) -> Self {
        Self {
            jurisdiction: jurisdiction.into(),
            sub_jurisdiction: sub_jurisdiction.into(),
            locality,
        }
    }

    pub fn base_url(&self) -> Result<&'static str, ConfigError> {
        jurisdiction::base_url(&self.jurisdiction)
    }

    pub fn storage_dir(&self, data_root: &Path) -> PathBuf {
        data_root
            .join(&self.jurisdiction)
            .join(&self.sub_jurisdiction)
            .join(self.locality.as_deref().unwrap_or(NO_CITY))
    }

    pub fn describe(&self) -> String {
        format!(
            "{}/{}/{}",
            self.jurisdiction,
            self.sub_jurisdiction,
            self.locality.as_deref().unwrap_or("unincorporated")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_dir_is_deterministic() {
        let ctx = LocationContext::new("oregon", "lane_county", None);
        let a = ctx.storage_dir(Path::new("legislative_data"));
        let b = ctx.storage_dir(Path::new("legislative_data"));
        assert_eq!(a, b);
        assert_eq!(
            a,
            Path::new("legislative_data/oregon/lane_county/no_city")
        );
    }

    #[test]
    fn locality_replaces_no_city() {
        let ctx = LocationContext::new("oregon", "lane_county", Some("eugene".into()));
        assert_eq!(
            ctx.storage_dir(Path::new("d")),
            Path::new("d/oregon/lane_county/eugene")
        );
    }
}

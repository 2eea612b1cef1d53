use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use legis_core::Snapshot;

/// One named resource collection at a time. Implementations decide transport;
/// the HTTP one below is the real thing, tests substitute their own.
pub trait PayloadSource: Send + Sync {
    fn fetch(&self, endpoint: &str) -> Result<Value>;
}

/// Fetches `<base_url><endpoint>?$format=json` with the client's default
/// timeout. No retries, no rate limiting.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl PayloadSource for HttpSource {
    fn fetch(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}?$format=json", self.base_url, endpoint);
        let payload = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("GET {}", url))?
            .json::<Value>()
            .with_context(|| format!("parse response body from {}", url))?;
        Ok(payload)
    }
}

/// Fetch every endpoint in order, absorbing per-endpoint failures. A failed
/// endpoint is recorded as `Null` so the snapshot always has one entry per
/// endpoint and one flaky endpoint never blocks the run.
pub fn collect_snapshot(source: &dyn PayloadSource, endpoints: &[String]) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for endpoint in endpoints {
        match source.fetch(endpoint) {
            Ok(payload) => {
                snapshot.insert(endpoint.clone(), payload);
            }
            Err(err) => {
                warn!("error fetching {}: {:#}", endpoint, err);
                snapshot.insert(endpoint.clone(), Value::Null);
            }
        }
    }
    snapshot
}

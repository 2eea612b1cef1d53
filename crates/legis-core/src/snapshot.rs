use std::collections::BTreeMap;

use serde_json::Value;

/// One complete capture of all endpoint payloads.
///
/// Every polled endpoint has an entry; a fetch failure is recorded as
/// `Value::Null`, never as a missing key.
pub type Snapshot = BTreeMap<String, Value>;

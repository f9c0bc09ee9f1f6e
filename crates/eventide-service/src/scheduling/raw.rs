use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Scheduling entry as delivered by the CMS.
///
/// Dates are epoch seconds of the day, times are `H:MM` strings added on top.
/// A field holding a value of the wrong type reads as absent, so a single bad
/// field never drops the whole entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduling {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_full_day: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub begin_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub begin_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub repetition: Option<RawRepetition>,
}

/// Repetition details of a [`RawScheduling`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRepetition {
    /// Number of occurrences.
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<u32>,
    /// Comma separated day names (`sun`..`sat`).
    #[serde(default, deserialize_with = "lenient")]
    pub dow: Option<String>,
    /// Occurrence of the weekday within its month.
    #[serde(default, deserialize_with = "lenient")]
    pub oom: Option<i32>,
    /// Zero-based month of year.
    #[serde(default, deserialize_with = "lenient")]
    pub moy: Option<u32>,
    /// Day of month.
    #[serde(default, deserialize_with = "lenient")]
    pub dom: Option<i32>,
    /// Epoch seconds of the last repetition date.
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub interval: Option<u32>,
}

/// Reads any JSON value and keeps it only if it has the expected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value)
        .inspect_err(|err| tracing::trace!(%err, "Ignoring mistyped raw field"))
        .ok())
}

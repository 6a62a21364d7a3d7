//! Daily forecast model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider's `daily` block: one array per requested field, one entry per day
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct DailyForecast {
    pub series: BTreeMap<String, Vec<Value>>,
}

impl DailyForecast {
    /// Number of forecast days, taken from the `time` series when present
    #[must_use]
    pub fn days(&self) -> usize {
        match self.series.get("time") {
            Some(time) => time.len(),
            None => self.series.values().map(Vec::len).max().unwrap_or(0),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&[Value]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// First series whose length differs from [`days`](Self::days)
    #[must_use]
    pub fn uneven_series(&self) -> Option<(&str, usize)> {
        let days = self.days();
        self.series
            .iter()
            .find(|(_, values)| values.len() != days)
            .map(|(name, values)| (name.as_str(), values.len()))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLC candle as handed to the chart renderer.
///
/// `time` is milliseconds since the Unix epoch. Any field may hold `f64::NAN`
/// when the source text could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// True when neither the timestamp nor any price is the NaN sentinel.
    pub fn is_complete(&self) -> bool {
        self.malformed_fields().is_empty()
    }

    /// Names of the fields holding the NaN sentinel, in column order.
    pub fn malformed_fields(&self) -> Vec<&'static str> {
        [
            ("time", self.time),
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_nan())
        .map(|(name, _)| name)
        .collect()
    }

    /// The candle's timestamp as a UTC datetime, `None` for the invalid-date sentinel.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        if !self.time.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(self.time as i64)
    }
}

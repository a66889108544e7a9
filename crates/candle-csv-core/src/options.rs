use chrono_tz::Tz;

use crate::error::ParseOptionsError;

/// Settings for turning CSV text into candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Zone used for timestamps that carry no UTC offset.
    pub timezone: Tz,
    /// Emit a warning for every row that degrades to a NaN sentinel.
    pub warn_malformed: bool,
}

impl ParseOptions {
    /// Options interpreting offset-less timestamps in the named IANA zone.
    pub fn with_timezone_name(name: &str) -> Result<Self, ParseOptionsError> {
        let timezone = name
            .parse::<Tz>()
            .map_err(|_| ParseOptionsError::UnknownTimezone(name.to_string()))?;
        Ok(Self {
            timezone,
            ..Self::default()
        })
    }

    pub fn warn_malformed(mut self, enabled: bool) -> Self {
        self.warn_malformed = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            warn_malformed: false,
        }
    }
}

use tracing::warn;

use crate::candle::Candle;
use crate::numeric::parse_float;
use crate::options::ParseOptions;
use crate::timestamp::parse_timestamp_ms;

/// Parse CSV text into candles, preserving row order.
///
/// Layout: a header line (skipped unchecked) followed by
/// `timestamp,open,high,low,close[,...]` rows. Blank lines are skipped and
/// extra trailing columns are ignored. Fields that fail to parse become
/// `f64::NAN`; no row is ever rejected.
pub fn parse_candles(content: &str, options: &ParseOptions) -> Vec<Candle> {
    let mut candles = Vec::new();

    for (idx, raw) in content.split('\n').enumerate().skip(1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let candle = parse_row(line, options);
        if options.warn_malformed && !candle.is_complete() {
            warn!(
                line = idx + 1,
                fields = ?candle.malformed_fields(),
                "row has unparseable fields: {line}"
            );
        }
        candles.push(candle);
    }

    candles
}

/// Parse a single trimmed data row. Missing columns parse as empty fields.
pub fn parse_row(line: &str, options: &ParseOptions) -> Candle {
    let fields: Vec<&str> = line.split(',').collect();
    let field = |i: usize| fields.get(i).copied().unwrap_or("");

    Candle::new(
        parse_timestamp_ms(field(0), options.timezone),
        parse_float(field(1)),
        parse_float(field(2)),
        parse_float(field(3)),
        parse_float(field(4)),
    )
}

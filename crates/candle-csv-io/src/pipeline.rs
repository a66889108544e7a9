use candle_csv_core::{Candle, ParseOptions, parse_candles};
use tracing::{debug, error, info};

use crate::error::SourceError;
use crate::sink::CandleSink;
use crate::source::TextSource;

/// Read the source and parse its content into candles.
pub async fn load_candles(
    source: &dyn TextSource,
    options: &ParseOptions,
) -> Result<Vec<Candle>, SourceError> {
    let content = source.read_text().await?;
    let candles = parse_candles(&content, options);
    info!("{}: parsed {} candle(s)", source.name(), candles.len());
    debug!("{}: {candles:?}", source.name());
    Ok(candles)
}

/// Load candles from `source` and hand them to `sink`.
///
/// Never fails: read and sink errors are logged and reported as `None`.
/// On a read failure the sink is not touched. Returns the number of candles
/// delivered otherwise.
pub async fn load_and_render(
    source: &dyn TextSource,
    sink: &dyn CandleSink,
    options: &ParseOptions,
) -> Option<usize> {
    let candles = match load_candles(source, options).await {
        Ok(candles) => candles,
        Err(e) => {
            error!("Error reading file: {e}");
            return None;
        }
    };

    if let Err(e) = sink.set_data(&candles).await {
        error!("{}: failed to deliver candles: {e}", sink.name());
        return None;
    }

    debug!("{}: delivered {} candle(s)", sink.name(), candles.len());
    Some(candles.len())
}

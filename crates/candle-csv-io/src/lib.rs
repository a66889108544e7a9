pub mod error;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use pipeline::{load_and_render, load_candles};
pub use sink::{CandleSink, JsonSink, MemorySink};
pub use source::{FileSource, StaticSource, TextSource};

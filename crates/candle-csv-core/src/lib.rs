pub mod candle;
pub mod error;
pub mod numeric;
pub mod options;
pub mod parser;
pub mod timestamp;

pub use candle::Candle;
pub use options::ParseOptions;
pub use parser::parse_candles;

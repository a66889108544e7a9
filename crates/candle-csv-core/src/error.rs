use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseOptionsError {
    #[error("Unknown time zone: {0}")]
    UnknownTimezone(String),
}

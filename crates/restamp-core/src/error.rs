use restamp_config::overlay::LayoutKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemporalError {
    #[error("text does not match the {0:?} layout")]
    NoMatch(LayoutKind),
    #[error("invalid {field} component: {value}")]
    InvalidComponent { field: &'static str, value: u32 },
    #[error("shifted date/time is out of range")]
    OutOfRange,
}

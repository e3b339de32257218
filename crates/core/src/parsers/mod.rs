pub mod json;

use thiserror::Error;

use crate::source::InMemorySource;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("json: {0}")]
    Json(#[from] json::JsonParseError),
    #[error("unable to detect trace format")]
    UnknownFormat,
}

/// A named, fully decoded trace.
#[derive(Debug, Clone)]
pub struct TraceFile {
    pub name: String,
    pub source: InMemorySource,
}

/// Detect the trace format and parse it. Currently only the JSON container
/// is recognized; detection is kept separate so binary formats can slot in.
pub fn parse_auto(data: &[u8]) -> Result<TraceFile, ParseError> {
    if data.trim_ascii_start().starts_with(b"{") {
        return Ok(json::parse_json(data)?);
    }
    Err(ParseError::UnknownFormat)
}

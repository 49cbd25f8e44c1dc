#![forbid(unsafe_code)]

use poem_openapi::Object;
use thiserror::Error;

/// Error enumerates the startup errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("counter_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Inaccessible logger configuration file.
    #[error("Unable to access the Log4rs configuration file: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),

    #[error("Data directory error: {}", .0)]
    DataDirectory(String),
}

/// CounterError enumerates the only two ways a counter operation can fail.
/// The display strings are returned verbatim to http clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("Counter {} already exists", .0)]
    Conflict(String),

    #[error("Counter {} does not exist", .0)]
    NotFound(String),
}

// ---------------------------------------------------------------------------
// RespMessage:
// ---------------------------------------------------------------------------
/// Error payload, serialized as `{"Message": "..."}`.
#[derive(Object, Debug)]
pub struct RespMessage
{
    #[oai(rename = "Message")]
    pub message: String,
}

impl RespMessage {
    pub fn new(message: String) -> Self {
        Self {message}
    }
}

impl From<CounterError> for RespMessage {
    fn from(e: CounterError) -> Self {
        Self::new(e.to_string())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_error_messages() {
        assert_eq!(CounterError::Conflict("foo".to_string()).to_string(),
                   "Counter foo already exists");
        assert_eq!(CounterError::NotFound("bar".to_string()).to_string(),
                   "Counter bar does not exist");
    }

    #[test]
    fn message_from_error() {
        let msg = RespMessage::from(CounterError::NotFound("x".to_string()));
        assert_eq!(msg.message, "Counter x does not exist");
    }
}

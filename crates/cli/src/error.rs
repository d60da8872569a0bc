//! CLI failures and their process exit codes.
//!
//! | code | meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | success                                                   |
//! | 2    | argument parse error (reported by clap)                   |
//! | 10   | simulation rejected its configuration                     |
//! | 11   | snapshot could not be written or replay file not read     |
//! | 12   | malformed user input (params JSON, replay file, color)    |
//! | 13   | JSON output could not be produced                         |

use satswarm_core::EngineError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Options or view were rejected by the simulation crates.
    Engine(EngineError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) => f.write_str(msg),
            CliError::Serialization(msg) => write!(f, "cannot encode output: {msg}"),
        }
    }
}

/// Write failures inside the renderer surface as I/O errors; everything else
/// is a configuration problem.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

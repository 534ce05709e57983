/// Error types for script execution
use thiserror::Error;

/// Errors that abort a script run
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix product with incompatible operand shapes
    #[error("cannot multiply {}x{} matrix by {}x{} matrix", left.0, left.1, right.0, right.1)]
    Dimension {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A command received fewer arguments than it needs
    #[error("line {line}: `{command}` expects {expected} arguments, found {found}")]
    ArgumentCount {
        command: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// An argument could not be read as a real number
    #[error("line {line}: `{command}` argument `{token}` is not a number")]
    ArgumentFormat {
        command: &'static str,
        line: usize,
        token: String,
    },

    /// Reading the script failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rasterizer failed to display or save the edge matrix
    #[error("output error: {0}")]
    Output(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, Error>;

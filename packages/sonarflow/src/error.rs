use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Message iterator already produced its stream end")]
    IteratorExhausted,

    #[error("Unknown query object: {0}")]
    UnknownQuery(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Window buffer overflow: a window received a value after reaching capacity")]
    BufferOverflow,

    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FlowError {
    /// True for errors caused by the data flowing through a pipeline rather
    /// than by how the pipeline was set up.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            FlowError::Parse { .. } | FlowError::Overflow(_) | FlowError::IoError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;

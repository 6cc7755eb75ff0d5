use thiserror::Error;

pub type KernelResult<T> = Result<T, KernelError>;

/// Everything that can go wrong before a render or a maze is produced.
/// All of these are detected up front, so a failed call never leaves
/// a partially written output behind.
#[derive(Error, Debug)]
pub enum KernelError {
    #[error("invalid dimension: `{name}` = {value}")]
    InvalidDimension { name: &'static str, value: String },

    /// No pixel escaped (or `max_iter_count <= 1`), so there is no
    /// distribution to normalize against.
    #[error("degenerate histogram: no escaped samples to normalize")]
    DegenerateHistogram,

    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("unable to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to parse parameter file: {0}")]
    Params(#[from] serde_json::Error),
}

impl KernelError {
    pub fn invalid_dimension<T: std::fmt::Display>(name: &'static str, value: T) -> KernelError {
        KernelError::InvalidDimension {
            name,
            value: value.to_string(),
        }
    }
}

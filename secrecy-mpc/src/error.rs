use thiserror::Error;

/// An Error enum capturing the errors produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Config Error
    #[error("Invalid Configuration")]
    ConfigError,
    /// Invalid number of parties
    #[error("Invalid number of parties {0}")]
    NumPartyError(usize),
    /// Invalid party id provided
    #[error("Invalid Party id {0}")]
    IdError(usize),
    /// A IO error has occurred
    #[error("IO error")]
    IOError(#[from] std::io::Error),
    /// Message size is invalid
    #[error("Message size is invalid")]
    InvalidMessageSize,
    /// A primitive that needs correlated randomness was used before the seeds were exchanged
    #[error("PRF is not initialized, call setup_prf first")]
    PrfNotInitialized,
    /// An operator needs an input size that is a power of two
    #[error("{0} is not a power of two")]
    NotPowerOfTwo(usize),
    /// Size is invalid
    #[error("Size is invalid")]
    InvalidSizeError,
    /// Column index out of range
    #[error("Invalid column {0}")]
    InvalidColumn(usize),
    /// Invalid value provided
    #[error("Invalid value: {0}")]
    ValueError(String),
    /// Error from the color_eyre crate
    #[error("ColorEyre error")]
    ColorEyreError(#[from] color_eyre::Report),
    /// Some other error has occurred.
    #[error("Err: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(mes: String) -> Self {
        Self::Other(mes)
    }
}
impl From<&str> for Error {
    fn from(mes: &str) -> Self {
        Self::Other(mes.to_owned())
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error("Source does not exist: {0}")]
    MissingSource(String),

    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid timestamp format: {0}")]
    TimestampFormat(String),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }
}

/// Error when reading and decoding a registry entry file.
#[derive(Debug, thiserror::Error)]
pub enum Read {
    /// Unable to perform file operation.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// File is neither UTF-8 nor UTF-16.
    #[error("Unsupported encoding")]
    UnsupportedEncoding,
}

/// Error when encoding and writing a registry entry file.
#[derive(Debug, thiserror::Error)]
pub enum Write {
    /// Unable to perform file operation.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Unable to move the staged content over the destination.
    #[error(transparent)]
    Persist(#[from] tempfile::PersistError),
}

/// Error when fixing up a registry entry file.
#[derive(Debug, thiserror::Error)]
pub enum Fix {
    /// Unable to copy the original file to the destination.
    #[error("Unable to copy registry entry file: {0}")]
    Copy(#[source] std::io::Error),
    /// Unable to read the copied file.
    #[error(transparent)]
    Read(#[from] Read),
    /// Unable to write the rewritten file.
    #[error(transparent)]
    Write(#[from] Write),
}

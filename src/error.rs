/// error type for memvc operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("commit not found: {0}")]
    CommitNotFound(String),

    #[error("no commits found for {0}")]
    CommitsNotFound(String),

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("not a valid tree: {0}")]
    InvalidTree(String),

    #[error("not a valid commit: {0}")]
    InvalidCommit(String),

    #[error("unexpected tree entry of type {0}")]
    UnexpectedTreeEntry(String),

    #[error("content area is frozen; clear it before putting or removing content")]
    ImmutableContentModified,

    #[error("encoding error: {0}")]
    Encoding(#[from] std::io::Error),

    #[error("invalid hash hex: {0}")]
    InvalidHashHex(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

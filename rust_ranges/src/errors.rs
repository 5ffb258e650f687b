#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Two values that had to be ordered against each other could not be.
    #[error("bad value for range: {left} cannot be compared with {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    /// The domain lacks the capability the operation needs (successor,
    /// addition, numeric view,...)
    #[error("{0}")]
    Unsupported(String),

    #[error("{0}")]
    Argument(String),

    /// The operation is meaningless for the shape of the range, like the last
    /// element of an endless range.
    #[error("{0}")]
    Boundary(String),

    #[error("{0}")]
    Type(String),

    #[error("range already initialized")]
    AlreadyInitialized,

    #[error("range used before initialization")]
    Uninitialized,

    #[error("invalid range syntax: {0}")]
    Parse(String),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Failures reported by a [`FontPlatform`](crate::platform::FontPlatform).
///
/// None of these reach the caller of a checker operation. They are folded
/// into a status or a `false` return value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("{0} is not available on this platform")]
    Unavailable(&'static str),

    #[error("platform exception: {0}")]
    Exception(String),

    #[error("font load rejected: {0}")]
    Rejected(String),
}

pub type PlatformResult<T> = Result<T, PlatformError>;

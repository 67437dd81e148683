use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error
{
    #[error("at least two numbers are required, got {count}")]
    TooFewNumbers { count: usize },
    #[error("at most {max} numbers are supported, got {count}")]
    TooManyNumbers { count: usize, max: usize },
    /// Nothing to search. Cannot happen for two or more numbers.
    #[error("no tree shapes to search")]
    NoShapes,
    /// Every candidate expression evaluated to infinity or NaN.
    #[error("no expression with a finite value was found")]
    NoFiniteCandidate,
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError)
}

impl Error
{
    /// Whether the error is caused by the command line rather than the search.
    pub fn is_usage(&self) -> bool
    {
        matches!(self, Error::TooFewNumbers { .. } | Error::TooManyNumbers { .. })
    }
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject a result limit of zero. Callers are expected to validate user input first; this is
/// never clamped.
pub(crate) fn check_top_n(top_n: usize) -> Result<()> {
    if top_n < 1 {
        return Err(Error::InvalidArgument(format!(
            "top_n must be at least 1, got {top_n}"
        )));
    }

    Ok(())
}

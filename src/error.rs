use std::error;
use std::fmt;
use std::result;

/// Errors raised when validating input on behalf of the index.
///
/// The skip list itself never fails; these are produced by the layers that feed it, which are
/// responsible for keeping non-comparable scores out of the ordering.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A score that cannot take part in the ordering, such as `NaN`.
    InvalidScore(f64),
    /// A textual range border that could not be parsed.
    InvalidBorder(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidScore(score) => write!(f, "score is not a valid float: {}", score),
            Error::InvalidBorder(border) => write!(f, "min or max is not a float: {:?}", border),
        }
    }
}

/// Convenience type for operations that can fail with an `Error`.
pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;
    use std::f64;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidBorder(String::from("(abc")).to_string(),
            "min or max is not a float: \"(abc\"",
        );
        assert_eq!(
            Error::InvalidScore(f64::NAN).to_string(),
            "score is not a valid float: NaN",
        );
    }
}

//! One-sided score boundaries for range queries.

use crate::error::{Error, Result};
use std::f64;
use std::str::FromStr;

/// A single end of a score range, used as either the lower or the upper border of a query.
///
/// Borders are plain values built by the caller and passed into range queries; the index never
/// mutates them.
///
/// # Examples
/// ```
/// use sorted_set::ScoreBorder;
///
/// let min = ScoreBorder::inclusive(2.0);
/// let max = ScoreBorder::exclusive(3.0);
///
/// assert!(min.is_lower_bound_satisfied_by(2.0));
/// assert!(!max.is_upper_bound_satisfied_by(3.0));
///
/// let parsed: ScoreBorder = "(3".parse().unwrap();
/// assert_eq!(parsed, max);
/// assert_eq!("-inf".parse::<ScoreBorder>(), Ok(ScoreBorder::NegativeInfinity));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScoreBorder {
    /// Below every score.
    NegativeInfinity,
    /// Above every score.
    PositiveInfinity,
    /// A finite limit, optionally excluding the value itself.
    Finite { value: f64, exclusive: bool },
}

impl ScoreBorder {
    /// A finite border that includes `value`.
    pub fn inclusive(value: f64) -> Self {
        ScoreBorder::Finite {
            value,
            exclusive: false,
        }
    }

    /// A finite border that excludes `value`.
    pub fn exclusive(value: f64) -> Self {
        ScoreBorder::Finite {
            value,
            exclusive: true,
        }
    }

    /// The limit of this border, with the infinite markers mapped to the float infinities.
    pub fn value(&self) -> f64 {
        match *self {
            ScoreBorder::NegativeInfinity => f64::NEG_INFINITY,
            ScoreBorder::PositiveInfinity => f64::INFINITY,
            ScoreBorder::Finite { value, .. } => value,
        }
    }

    /// Returns `true` if the border excludes its own limit. Infinite borders are never exclusive.
    pub fn is_exclusive(&self) -> bool {
        match *self {
            ScoreBorder::Finite { exclusive, .. } => exclusive,
            _ => false,
        }
    }

    /// Returns `true` if `value` lies under this border when it is used as the upper end of a
    /// range.
    pub fn is_upper_bound_satisfied_by(&self, value: f64) -> bool {
        match *self {
            ScoreBorder::NegativeInfinity => false,
            ScoreBorder::PositiveInfinity => true,
            ScoreBorder::Finite { value: limit, exclusive: true } => value < limit,
            ScoreBorder::Finite { value: limit, exclusive: false } => value <= limit,
        }
    }

    /// Returns `true` if `value` lies above this border when it is used as the lower end of a
    /// range.
    pub fn is_lower_bound_satisfied_by(&self, value: f64) -> bool {
        match *self {
            ScoreBorder::NegativeInfinity => true,
            ScoreBorder::PositiveInfinity => false,
            ScoreBorder::Finite { value: limit, exclusive: true } => limit < value,
            ScoreBorder::Finite { value: limit, exclusive: false } => limit <= value,
        }
    }
}

impl FromStr for ScoreBorder {
    type Err = Error;

    /// Parses the textual border syntax of the store: `-inf`, `+inf` (or `inf`), a bare float for
    /// an inclusive border, and a float prefixed with `(` for an exclusive one.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-inf" => return Ok(ScoreBorder::NegativeInfinity),
            "+inf" | "inf" => return Ok(ScoreBorder::PositiveInfinity),
            _ => {}
        }

        let (digits, exclusive) = if s.starts_with('(') {
            (&s[1..], true)
        } else {
            (s, false)
        };
        match digits.parse::<f64>() {
            Ok(value) if !value.is_nan() => Ok(ScoreBorder::Finite { value, exclusive }),
            _ => Err(Error::InvalidBorder(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreBorder;
    use crate::error::Error;
    use std::f64;

    #[test]
    fn test_upper_bound() {
        assert!(ScoreBorder::PositiveInfinity.is_upper_bound_satisfied_by(f64::MAX));
        assert!(!ScoreBorder::NegativeInfinity.is_upper_bound_satisfied_by(f64::MIN));

        assert!(ScoreBorder::inclusive(3.0).is_upper_bound_satisfied_by(3.0));
        assert!(ScoreBorder::inclusive(3.0).is_upper_bound_satisfied_by(2.5));
        assert!(!ScoreBorder::inclusive(3.0).is_upper_bound_satisfied_by(3.5));

        assert!(!ScoreBorder::exclusive(3.0).is_upper_bound_satisfied_by(3.0));
        assert!(ScoreBorder::exclusive(3.0).is_upper_bound_satisfied_by(2.5));
    }

    #[test]
    fn test_lower_bound() {
        assert!(ScoreBorder::NegativeInfinity.is_lower_bound_satisfied_by(f64::MIN));
        assert!(!ScoreBorder::PositiveInfinity.is_lower_bound_satisfied_by(f64::MAX));

        assert!(ScoreBorder::inclusive(2.0).is_lower_bound_satisfied_by(2.0));
        assert!(ScoreBorder::inclusive(2.0).is_lower_bound_satisfied_by(2.5));
        assert!(!ScoreBorder::inclusive(2.0).is_lower_bound_satisfied_by(1.5));

        assert!(!ScoreBorder::exclusive(2.0).is_lower_bound_satisfied_by(2.0));
        assert!(ScoreBorder::exclusive(2.0).is_lower_bound_satisfied_by(2.5));
    }

    #[test]
    fn test_value_and_exclusivity() {
        assert_eq!(ScoreBorder::NegativeInfinity.value(), f64::NEG_INFINITY);
        assert_eq!(ScoreBorder::PositiveInfinity.value(), f64::INFINITY);
        assert_eq!(ScoreBorder::exclusive(1.5).value(), 1.5);
        assert!(ScoreBorder::exclusive(1.5).is_exclusive());
        assert!(!ScoreBorder::inclusive(1.5).is_exclusive());
        assert!(!ScoreBorder::PositiveInfinity.is_exclusive());
    }

    #[test]
    fn test_parse() {
        assert_eq!("-inf".parse::<ScoreBorder>(), Ok(ScoreBorder::NegativeInfinity));
        assert_eq!("+inf".parse::<ScoreBorder>(), Ok(ScoreBorder::PositiveInfinity));
        assert_eq!("inf".parse::<ScoreBorder>(), Ok(ScoreBorder::PositiveInfinity));
        assert_eq!("1.5".parse::<ScoreBorder>(), Ok(ScoreBorder::inclusive(1.5)));
        assert_eq!("(1.5".parse::<ScoreBorder>(), Ok(ScoreBorder::exclusive(1.5)));
        assert_eq!("-2".parse::<ScoreBorder>(), Ok(ScoreBorder::inclusive(-2.0)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            "(".parse::<ScoreBorder>(),
            Err(Error::InvalidBorder(String::from("("))),
        );
        assert_eq!(
            "abc".parse::<ScoreBorder>(),
            Err(Error::InvalidBorder(String::from("abc"))),
        );
        assert_eq!(
            "NaN".parse::<ScoreBorder>(),
            Err(Error::InvalidBorder(String::from("NaN"))),
        );
    }
}

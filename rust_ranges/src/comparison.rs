use crate::domain::Ordered;
use crate::errors::{Error, Result};
use std::cmp::Ordering;

/// The outcome of comparing two values.  Unlike `Option<Ordering>`, the
/// failure case is named, so that each caller decides whether it means
/// "no match" or an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Equal,
    Greater,
    Incomparable,
}

impl Comparison {
    #[must_use]
    pub fn ordering(self) -> Option<Ordering> {
        match self {
            Comparison::Less => Some(Ordering::Less),
            Comparison::Equal => Some(Ordering::Equal),
            Comparison::Greater => Some(Ordering::Greater),
            Comparison::Incomparable => None,
        }
    }

    /// Whether the left value was less than or equal to the right one.
    /// False when they cannot be compared.
    #[must_use]
    pub fn is_le(self) -> bool {
        matches!(self, Comparison::Less | Comparison::Equal)
    }

    #[must_use]
    pub fn is_lt(self) -> bool {
        matches!(self, Comparison::Less)
    }

    #[must_use]
    pub fn is_ge(self) -> bool {
        matches!(self, Comparison::Greater | Comparison::Equal)
    }

    #[must_use]
    pub fn is_gt(self) -> bool {
        matches!(self, Comparison::Greater)
    }

    /// Swap the roles of the two compared values.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Comparison::Less => Comparison::Greater,
            Comparison::Greater => Comparison::Less,
            Comparison::Equal => Comparison::Equal,
            Comparison::Incomparable => Comparison::Incomparable,
        }
    }
}

impl From<Option<Ordering>> for Comparison {
    fn from(value: Option<Ordering>) -> Self {
        match value {
            Some(Ordering::Less) => Comparison::Less,
            Some(Ordering::Equal) => Comparison::Equal,
            Some(Ordering::Greater) => Comparison::Greater,
            None => Comparison::Incomparable,
        }
    }
}

/// Three-way comparison between two values, possibly of different types.
#[must_use]
pub fn compare<T, V>(left: &T, right: &V) -> Comparison
where
    T: PartialOrd<V> + ?Sized,
    V: ?Sized,
{
    left.partial_cmp(right).into()
}

/// Same as [`compare`], but the two values are required to be comparable.
/// The error names the types of both values.
pub fn try_compare<T: Ordered>(left: &T, right: &T) -> Result<Ordering> {
    compare(left, right)
        .ordering()
        .ok_or_else(|| Error::Incomparable {
            left: left.type_name(),
            right: right.type_name(),
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::numeric::Numeric;

    #[test]
    fn test_compare() {
        assert_eq!(compare(&1, &2), Comparison::Less);
        assert_eq!(compare(&2, &2), Comparison::Equal);
        assert_eq!(compare(&3, &2), Comparison::Greater);
        assert_eq!(compare(&1.0, &f64::NAN), Comparison::Incomparable);
        assert_eq!(compare("abc", "abd"), Comparison::Less);

        assert!(Comparison::Less.is_le());
        assert!(Comparison::Equal.is_le());
        assert!(!Comparison::Incomparable.is_le());
        assert!(!Comparison::Incomparable.is_ge());
        assert!(!Comparison::Incomparable.is_gt());
        assert_eq!(Comparison::Less.reverse(), Comparison::Greater);
        assert_eq!(
            Comparison::Incomparable.reverse(),
            Comparison::Incomparable
        );
    }

    #[test]
    fn test_try_compare() -> Result<()> {
        assert_eq!(try_compare(&1_i64, &5)?, Ordering::Less);
        assert_eq!(
            try_compare(&Numeric::Int(2), &Numeric::Float(1.5))?,
            Ordering::Greater
        );

        match try_compare(&Numeric::Int(2), &Numeric::Float(f64::NAN)) {
            Err(Error::Incomparable { left, right }) => {
                assert_eq!(left, "Integer");
                assert_eq!(right, "Float");
            }
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }
}

use crate::comparison::{compare, try_compare, Comparison};
use crate::domain::{Ordered, Successor};
use crate::errors::{Error, Result};
use crate::numeric::Numeric;
use crate::size::{float_step_size, integer_step_size, Size};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::ControlFlow;

lazy_static! {
    static ref RANGE_SYNTAX: Regex =
        Regex::new(r"^\s*(?P<low>.*?)(?P<sep>\.\.\.?)(?P<high>.*?)\s*$")
            .expect("range syntax is a valid regular expression");
}

/// A range of values.
///
/// Either bound can be absent, in which case the range extends forever on
/// that side.  The low bound is always included, and the high bound is
/// excluded when `exclusive` is set.  The flag is kept even when there is
/// no high bound, so that `5..` and `5...` remain distinct values.
#[derive(Clone, PartialEq, Hash)]
pub struct Range<T> {
    pub(crate) low: Option<T>,
    pub(crate) high: Option<T>,
    pub(crate) exclusive: bool,
}

impl<T> Range<T> {
    /// `..high` or `...high`
    #[must_use]
    pub fn beginless(high: T, exclusive: bool) -> Self {
        Self { low: None, high: Some(high), exclusive }
    }

    /// `low..` or `low...`
    #[must_use]
    pub fn endless(low: T, exclusive: bool) -> Self {
        Self { low: Some(low), high: None, exclusive }
    }

    /// `nil..nil` or `nil...nil`, which contains every value.
    #[must_use]
    pub fn unbounded(exclusive: bool) -> Self {
        Self { low: None, high: None, exclusive }
    }

    #[must_use]
    pub fn low(&self) -> Option<&T> {
        self.low.as_ref()
    }

    #[must_use]
    pub fn high(&self) -> Option<&T> {
        self.high.as_ref()
    }

    #[must_use]
    pub fn exclude_end(&self) -> bool {
        self.exclusive
    }

    #[must_use]
    pub fn is_beginless(&self) -> bool {
        self.low.is_none()
    }

    #[must_use]
    pub fn is_endless(&self) -> bool {
        self.high.is_none()
    }

    /// The range is `a...b` or `a..b`, with `b` reachable from `a` if
    /// enumerated in order.
    pub(crate) fn has_both_bounds(&self) -> Option<(&T, &T)> {
        self.low.as_ref().zip(self.high.as_ref())
    }
}

/// Whether `[beg, end]` (or `[beg, end)`) contains no value.  Absent bounds
/// never make a region empty.
fn empty_region<T: PartialOrd>(
    beg: &Option<T>,
    end: &Option<T>,
    exclusive: bool,
) -> bool {
    match (beg, end) {
        (Some(b), Some(e)) => match compare(b, e) {
            Comparison::Less => false,
            Comparison::Equal => exclusive,
            Comparison::Greater | Comparison::Incomparable => true,
        },
        (None, _) | (_, None) => false,
    }
}

impl<T: PartialOrd> Range<T> {
    /// True if the range contains no value.  Ranges whose bounds cannot be
    /// compared are also empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        empty_region(&self.low, &self.high, self.exclusive)
    }

    /// Whether the low bound is greater than the high bound
    #[must_use]
    pub fn is_backward(&self) -> bool {
        self.has_both_bounds()
            .is_some_and(|(l, h)| compare(l, h) == Comparison::Greater)
    }

    /// Whether `value` lies between the bounds of the range.  A value that
    /// cannot be compared with the bounds is never a member.
    #[must_use]
    pub fn member<V: ?Sized>(&self, value: &V) -> bool
    where
        T: PartialOrd<V>,
    {
        let above_low = match &self.low {
            None => true,
            Some(low) => compare(low, value).is_le(),
        };
        let below_high = match &self.high {
            None => true,
            Some(high) if self.exclusive => compare(high, value).is_gt(),
            Some(high) => compare(high, value).is_ge(),
        };
        above_low && below_high
    }

    /// Same as [`Range::member`].  A range with no bounds at all covers
    /// every value, even those that cannot be compared.
    #[must_use]
    pub fn covers<V: ?Sized>(&self, value: &V) -> bool
    where
        T: PartialOrd<V>,
    {
        (self.low.is_none() && self.high.is_none()) || self.member(value)
    }

    /// Whether the two ranges have at least one value in common.  An empty
    /// range overlaps nothing, not even itself.
    #[must_use]
    pub fn overlaps(&self, other: &Range<T>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if empty_region(&self.low, &other.high, other.exclusive)
            || empty_region(&other.low, &self.high, self.exclusive)
        {
            return false;
        }
        match (&self.low, &other.low) {
            (Some(a), Some(b)) => compare(a, b) != Comparison::Incomparable,
            (None, None) => match (&self.high, &other.high) {
                (Some(a), Some(b)) => {
                    compare(a, b) != Comparison::Incomparable
                }
                (None, _) | (_, None) => true,
            },
            (None, Some(_)) | (Some(_), None) => true,
        }
    }
}

impl<T: Ordered> Range<T> {
    /// Whether the range extends forever upward, either because it has no
    /// high bound or because that bound is positive infinity.
    pub(crate) fn is_unbounded_above(&self) -> bool {
        self.high.as_ref().map_or(true, |h| {
            matches!(h.as_numeric(), Some(Numeric::Float(f)) if f == f64::INFINITY)
        })
    }

    /// A range with both bounds.  They must be comparable with each other,
    /// though `low` can be greater than `high` (the range is then empty).
    pub fn new(low: T, high: T, exclusive: bool) -> Result<Self> {
        try_compare(&low, &high)?;
        Ok(Self { low: Some(low), high: Some(high), exclusive })
    }

    /// `low..high`
    pub fn inclusive(low: T, high: T) -> Result<Self> {
        Self::new(low, high, false)
    }

    /// `low...high`
    pub fn exclusive(low: T, high: T) -> Result<Self> {
        Self::new(low, high, true)
    }

    /// Whether all values of `other` are also in self.  Empty ranges are
    /// never covered.
    ///
    /// With an inclusive `self` and an exclusive `other` on a discrete
    /// domain, `1..5` covers `1...6`, since the largest value of the latter
    /// is 5.  On the other hand, `nil...nil` does not cover `nil..nil`
    /// although both contain every value.
    #[must_use]
    pub fn covers_range(&self, other: &Range<T>) -> bool {
        if self.high.is_some() && other.high.is_none() {
            return false;
        }
        if self.low.is_some() && other.low.is_none() {
            return false;
        }
        if other.is_empty() {
            return false;
        }
        if let Some(low) = &other.low {
            if !self.covers(low) {
                return false;
            }
        }

        // An absent high bound is greater than any value
        let cmp_end = match (&self.high, &other.high) {
            (None, None) => Comparison::Equal,
            (None, Some(_)) => Comparison::Greater,
            (Some(_), None) => Comparison::Less,
            (Some(a), Some(b)) => compare(a, b),
        };

        match (self.exclusive, other.exclusive) {
            (true, true) | (false, false) => cmp_end.is_ge(),
            (true, false) => cmp_end.is_gt(),
            (false, true) => {
                cmp_end.is_ge()
                    || match (&self.high, other.largest_excluded()) {
                        (Some(high), Some(max)) => compare(high, &max).is_ge(),
                        (None, _) | (_, None) => false,
                    }
            }
        }
    }

    /// For an exclusive range, the largest value it contains, when the
    /// domain is discrete.
    fn largest_excluded(&self) -> Option<T> {
        let high = self.high.as_ref()?;
        if high.as_integer().is_some() {
            match &self.low {
                Some(low) if low.as_integer().is_none() => None,
                Some(_) | None => high.pred(),
            }
        } else if high.as_numeric().is_none() {
            high.pred()
        } else {
            None
        }
    }

    /// Strict equality: bounds must be `eql`, so `1..2` is equal but not
    /// `eql` to `1.0..2.0`.
    #[must_use]
    pub fn eql(&self, other: &Range<T>) -> bool {
        fn bound_eql<T: Ordered>(a: &Option<T>, b: &Option<T>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a.eql(b),
                (None, None) => true,
                (Some(_), None) | (None, Some(_)) => false,
            }
        }
        self.exclusive == other.exclusive
            && bound_eql(&self.low, &other.low)
            && bound_eql(&self.high, &other.high)
    }

    /// The number of values in the range, computed without enumerating.
    /// Only ranges starting at an integer have a known size.
    #[must_use]
    pub fn size(&self) -> Size {
        let Some(low) = self.low.as_ref().and_then(Ordered::as_integer) else {
            return Size::Unknown;
        };
        match self.high.as_ref().map(Ordered::as_numeric) {
            None => Size::Unbounded,
            Some(None) => Size::Unknown,
            Some(Some(Numeric::Int(high))) => {
                Size::Finite(integer_step_size(low, high, 1, self.exclusive))
            }
            Some(Some(Numeric::Float(high))) if high == f64::INFINITY => {
                Size::Unbounded
            }
            Some(Some(Numeric::Float(high))) => {
                float_step_size(low as f64, high, 1.0, self.exclusive)
            }
        }
    }

    /// The low bound.
    pub fn first(&self) -> Result<&T> {
        self.low.as_ref().ok_or_else(|| {
            Error::Boundary("cannot get the first element of beginless range".into())
        })
    }

    /// The high bound, even when it is excluded.
    pub fn last(&self) -> Result<&T> {
        self.high.as_ref().ok_or_else(|| {
            Error::Boundary("cannot get the last element of endless range".into())
        })
    }

    /// The smallest value in the range, or None if the range is empty.
    pub fn min(&self) -> Result<Option<T>> {
        let Some(low) = &self.low else {
            return Err(Error::Boundary(
                "cannot get the minimum of beginless range".into(),
            ));
        };
        if self.is_empty() {
            Ok(None)
        } else {
            Ok(Some(low.clone()))
        }
    }

    /// The largest value in the range, or None if the range is empty.
    /// With an exclusive high bound, this is only known for discrete
    /// domains.
    pub fn max(&self) -> Result<Option<T>> {
        let Some(high) = &self.high else {
            return Err(Error::Boundary(
                "cannot get the maximum of endless range".into(),
            ));
        };
        let Some(low) = &self.low else {
            return Err(Error::Boundary(
                "cannot get the maximum of beginless range".into(),
            ));
        };
        if compare(low, high) == Comparison::Greater {
            return Ok(None);
        }
        if !self.exclusive {
            return Ok(Some(high.clone()));
        }
        if high.as_numeric().is_some() && high.as_integer().is_none() {
            return Err(Error::Type("cannot exclude non Integer end value".into()));
        }
        if self.is_empty() {
            return Ok(None);
        }
        if low.as_numeric().is_some() && low.as_integer().is_none() {
            return Err(Error::Type(
                "cannot exclude end value with non Integer begin value".into(),
            ));
        }
        match high.pred() {
            Some(max) => Ok(Some(max)),
            None => Err(Error::Type(format!(
                "cannot exclude end value of type {}",
                high.type_name()
            ))),
        }
    }

    /// The representation of the range with bounds in their debug form.
    /// A range without any bound shows them as `nil`.
    #[must_use]
    pub fn inspect(&self) -> String {
        format!("{self:?}")
    }
}

impl<T: Successor> Range<T> {
    /// Number of values in the range.  Ranges with a missing bound are
    /// unbounded, other ranges are enumerated unless their size is known.
    pub fn count(&self) -> Result<Size> {
        if self.low.is_none() || self.high.is_none() {
            return Ok(Size::Unbounded);
        }
        match self.size() {
            Size::Unknown => Ok(Size::Finite(self.each()?.count() as u64)),
            size @ (Size::Finite(_) | Size::Unbounded) => Ok(size),
        }
    }

    /// Number of values for which `predicate` is true.  This enumerates the
    /// whole range, so never returns for an endless one.
    pub fn count_where<F>(&self, mut predicate: F) -> Result<u64>
    where
        F: FnMut(&T) -> bool,
    {
        Ok(self.each()?.filter(|v| predicate(v)).count() as u64)
    }

    /// The first `n` values of the range.
    pub fn first_n(&self, n: usize) -> Result<Vec<T>> {
        Ok(self.each()?.take(n).collect_vec())
    }

    /// The last `n` values of the range, in increasing order.
    pub fn last_n(&self, n: usize) -> Result<Vec<T>> {
        if self.is_unbounded_above() {
            return Err(Error::Boundary(
                "cannot get the last element of endless range".into(),
            ));
        }
        let integers = self
            .has_both_bounds()
            .is_some_and(|(l, h)| l.as_integer().is_some() && h.as_integer().is_some());
        if integers {
            let mut tail = self.reverse_each()?.take(n).collect_vec();
            tail.reverse();
            Ok(tail)
        } else {
            let all = self.to_vec()?;
            let skip = all.len().saturating_sub(n);
            Ok(all.into_iter().skip(skip).collect_vec())
        }
    }

    /// All values of the range.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        if self.is_unbounded_above() {
            return Err(Error::Boundary(
                "cannot convert endless range to an array".into(),
            ));
        }
        Ok(self.each()?.collect_vec())
    }

    /// Call `consumer` for each value of the range, until it breaks.  The
    /// value given to `Break` is returned.
    pub fn each_with<B, F>(&self, mut consumer: F) -> Result<Option<B>>
    where
        F: FnMut(T) -> ControlFlow<B>,
    {
        for value in self.each()? {
            if let ControlFlow::Break(b) = consumer(value) {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Range<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(low) = &self.low {
            write!(f, "{low}")?;
        }
        f.write_str(if self.exclusive { "..." } else { ".." })?;
        if let Some(high) = &self.high {
            write!(f, "{high}")?;
        }
        Ok(())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Range<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.low {
            Some(low) => write!(f, "{low:?}")?,
            None if self.high.is_none() => f.write_str("nil")?,
            None => {}
        }
        f.write_str(if self.exclusive { "..." } else { ".." })?;
        match &self.high {
            Some(high) => write!(f, "{high:?}"),
            None if self.low.is_none() => f.write_str("nil"),
            None => Ok(()),
        }
    }
}

fn parse_bound<T>(text: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match text.trim() {
        "" | "nil" => Ok(None),
        t => t
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Parse(format!("{t}: {e}"))),
    }
}

/// Parses both `to_string` and `inspect` output.
impl<T> std::str::FromStr for Range<T>
where
    T: Ordered + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = RANGE_SYNTAX
            .captures(s)
            .ok_or_else(|| Error::Parse(s.to_string()))?;
        let exclusive = caps.name("sep").is_some_and(|m| m.as_str() == "...");
        let low = parse_bound(caps.name("low").map_or("", |m| m.as_str()))?;
        let high = parse_bound(caps.name("high").map_or("", |m| m.as_str()))?;
        match (low, high) {
            (Some(low), Some(high)) => Range::new(low, high, exclusive),
            (low, high) => Ok(Range { low, high, exclusive }),
        }
    }
}

//! Binary search over the values of a numeric range.
//!
//! The predicate is either boolean (all `false` results must come before
//! all `true` results, and the leftmost `true` is returned), or numeric
//! (positive results come before zeros, which come before negative results,
//! and any value returning zero is returned).
//!
//! Integer ranges are searched directly.  Float ranges are searched over
//! the bit patterns of the floats, mapped to integers in a way that
//! preserves ordering, so that every representable float between the
//! bounds is a candidate.

use crate::domain::Ordered;
use crate::errors::{Error, Result};
use crate::numeric::Numeric;
use crate::ranges::Range;
use crate::size::Size;
use std::marker::PhantomData;

/// What a predicate result tells about where the searched value is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// Boolean true: this value matches, but there might be a smaller one.
    Hit,

    /// The searched value is smaller.
    Left,

    /// The searched value is larger.
    Right,

    /// Numeric zero: this is a searched value.
    Exact,
}

/// Results a binary search predicate can return.
pub trait IntoProbe {
    fn into_probe(self) -> Result<Probe>;
}

impl IntoProbe for Probe {
    fn into_probe(self) -> Result<Probe> {
        Ok(self)
    }
}

impl IntoProbe for bool {
    fn into_probe(self) -> Result<Probe> {
        Ok(if self { Probe::Hit } else { Probe::Right })
    }
}

/// None is the same as false
impl IntoProbe for Option<bool> {
    fn into_probe(self) -> Result<Probe> {
        self.unwrap_or(false).into_probe()
    }
}

macro_rules! integer_probe {
    ($($t:ty),*) => {
        $(
            impl IntoProbe for $t {
                fn into_probe(self) -> Result<Probe> {
                    Ok(match self.cmp(&0) {
                        std::cmp::Ordering::Less => Probe::Left,
                        std::cmp::Ordering::Equal => Probe::Exact,
                        std::cmp::Ordering::Greater => Probe::Right,
                    })
                }
            }
        )*
    };
}

integer_probe!(i8, i16, i32, i64, isize);

impl IntoProbe for f64 {
    fn into_probe(self) -> Result<Probe> {
        match self.partial_cmp(&0.0) {
            Some(std::cmp::Ordering::Less) => Ok(Probe::Left),
            Some(std::cmp::Ordering::Equal) => Ok(Probe::Exact),
            Some(std::cmp::Ordering::Greater) => Ok(Probe::Right),
            None => Err(Error::Type(
                "wrong argument type Float NaN (must be numeric, true, false or nil)"
                    .into(),
            )),
        }
    }
}

impl IntoProbe for Numeric {
    fn into_probe(self) -> Result<Probe> {
        match self {
            Numeric::Int(i) => i.into_probe(),
            Numeric::Float(f) => f.into_probe(),
        }
    }
}

/// Order-preserving map from floats to integers.  Both zeros map to 0.
fn float_to_key(f: f64) -> i128 {
    let bits = i128::from(f.abs().to_bits());
    if f.is_sign_negative() {
        -bits
    } else {
        bits
    }
}

fn key_to_float(key: i128) -> f64 {
    let bits = u64::try_from(key.unsigned_abs()).unwrap_or(u64::MAX);
    if key < 0 {
        -f64::from_bits(bits)
    } else {
        f64::from_bits(bits)
    }
}

/// Halve `[lo, hi]` until the probe finds an exact match, or until the
/// leftmost hit is known.
fn search_keys<F>(mut lo: i128, mut hi: i128, probe: &mut F) -> Result<Option<i128>>
where
    F: FnMut(i128) -> Result<Probe>,
{
    let mut found = None;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let p = probe(mid)?;
        log::trace!("bsearch [{lo}, {hi}] at {mid}: {p:?}");
        match p {
            Probe::Exact => return Ok(Some(mid)),
            Probe::Hit => {
                found = Some(mid);
                hi = mid - 1;
            }
            Probe::Left => hi = mid - 1,
            Probe::Right => lo = mid + 1,
        }
    }
    Ok(found)
}

/// Smallest or largest integer between `from` and `towards` that can be
/// represented in the domain `T`.  The representable integers are
/// contiguous and include `from`.
fn domain_limit<T: Ordered>(from: i64, upward: bool) -> Result<i128> {
    let representable =
        |k: i128| i64::try_from(k).ok().map(Numeric::Int).and_then(T::from_numeric).is_some();
    let (lo, hi) = if upward {
        (i128::from(from), i128::from(i64::MAX))
    } else {
        (i128::from(i64::MIN), i128::from(from))
    };
    if upward && representable(hi) {
        return Ok(hi);
    }
    if !upward && representable(lo) {
        return Ok(lo);
    }
    let edge = search_keys(lo, hi, &mut |k| {
        Ok(if representable(k) == upward { Probe::Right } else { Probe::Hit })
    })?;
    match edge {
        Some(k) if upward => Ok(k - 1),
        Some(k) => Ok(k),
        None => Ok(hi),
    }
}

#[derive(Clone, Copy, Debug)]
enum Bracket {
    /// Nothing to search
    Empty,

    /// Integers between two bounds, both included
    Bounded(i128, i128),

    /// Integers from `low`, up to the largest value of the domain
    Upward { low: i128, cap: i128 },

    /// Integers down from `top`, to the smallest value of the domain
    Downward { top: i128, floor: i128 },

    /// Keys of floats, as computed by `float_to_key`
    Floats(i128, i128),
}

/// A binary search on a range, waiting for its predicate.
#[derive(Clone, Debug)]
pub struct Searcher<T> {
    bracket: Bracket,
    floats: bool,
    domain: PhantomData<T>,
}

impl<T: Ordered> Searcher<T> {
    fn new(range: &Range<T>) -> Result<Self> {
        let low = range.low.as_ref().map(|v| (v, v.as_numeric()));
        let high = range.high.as_ref().map(|v| (v, v.as_numeric()));

        let numeric = |bound: &Option<(&T, Option<Numeric>)>| -> Result<Option<Numeric>> {
            match bound {
                None => Ok(None),
                Some((_, Some(n))) => Ok(Some(*n)),
                Some((v, None)) => Err(Error::Unsupported(format!(
                    "can't do binary search for {}",
                    v.type_name()
                ))),
            }
        };
        let low = numeric(&low)?;
        let high = numeric(&high)?;
        let excl = i128::from(range.exclusive && high.is_some());

        let floats = low.is_some_and(|n| n.is_float()) || high.is_some_and(|n| n.is_float());
        let bracket = if floats {
            if low.is_some_and(|n| n.is_nan()) || high.is_some_and(|n| n.is_nan()) {
                Bracket::Empty
            } else {
                Bracket::Floats(
                    float_to_key(low.map_or(f64::NEG_INFINITY, |n| n.as_f64())),
                    float_to_key(high.map_or(f64::INFINITY, |n| n.as_f64())) - excl,
                )
            }
        } else {
            match (low, high) {
                (Some(Numeric::Int(l)), Some(Numeric::Int(h))) => {
                    Bracket::Bounded(i128::from(l), i128::from(h) - excl)
                }
                (Some(Numeric::Int(l)), None) => Bracket::Upward {
                    low: i128::from(l),
                    cap: domain_limit::<T>(l, true)?,
                },
                (None, Some(Numeric::Int(h))) => Bracket::Downward {
                    top: i128::from(h) - excl,
                    floor: domain_limit::<T>(h, false)?,
                },
                (None, None) => {
                    return Err(Error::Unsupported(
                        "can't do binary search on a range without bounds".into(),
                    ))
                }
                (Some(Numeric::Float(_)), _) | (_, Some(Numeric::Float(_))) => {
                    Bracket::Empty
                }
            }
        };
        log::debug!("bsearch {range:?} in {bracket:?}");

        Ok(Self { bracket, floats, domain: PhantomData })
    }

    /// The number of values the search will return, which is never known
    /// in advance.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::Unknown
    }

    fn value_at(&self, key: i128) -> Result<T> {
        let n = if self.floats {
            Some(Numeric::Float(key_to_float(key)))
        } else {
            i64::try_from(key).ok().map(Numeric::Int)
        };
        n.and_then(T::from_numeric)
            .ok_or_else(|| Error::Type(format!("no value for search key {key}")))
    }

    /// Run the search with the given predicate.
    pub fn find<R, F>(&self, mut predicate: F) -> Result<Option<T>>
    where
        R: IntoProbe,
        F: FnMut(T) -> R,
    {
        let mut probe = |key: i128| predicate(self.value_at(key)?).into_probe();

        let found = match self.bracket {
            Bracket::Empty => None,
            Bracket::Bounded(lo, hi) | Bracket::Floats(lo, hi) => {
                search_keys(lo, hi, &mut probe)?
            }
            Bracket::Upward { low, cap } => {
                let mut diff = 1_i128;
                loop {
                    let mid = (low + diff).min(cap);
                    log::trace!("bsearch upward from {low}, probing {mid}");
                    match probe(mid)? {
                        Probe::Exact => break Some(mid),
                        Probe::Hit | Probe::Left => {
                            break search_keys(low, mid, &mut probe)?
                        }
                        Probe::Right if mid >= cap => break None,
                        Probe::Right => diff *= 2,
                    }
                }
            }
            Bracket::Downward { top, floor } => {
                let mut diff = 1_i128;
                loop {
                    let mid = (top - diff).max(floor);
                    log::trace!("bsearch downward from {top}, probing {mid}");
                    match probe(mid)? {
                        Probe::Exact => break Some(mid),
                        Probe::Right => break search_keys(mid, top, &mut probe)?,
                        Probe::Hit | Probe::Left if mid <= floor => {
                            break search_keys(floor, top, &mut probe)?
                        }
                        Probe::Hit | Probe::Left => diff *= 2,
                    }
                }
            }
        };
        found.map(|key| self.value_at(key)).transpose()
    }
}

impl<T: Ordered> Range<T> {
    /// Prepare a binary search on the range, to be run later with
    /// [`Searcher::find`].
    pub fn searcher(&self) -> Result<Searcher<T>> {
        Searcher::new(self)
    }

    /// Binary search for a value of the range.
    ///
    /// ```
    /// use rust_ranges::Range;
    /// let r = Range::new(0_i64, 100, false)?;
    /// assert_eq!(r.bsearch(|x| x * x >= 50)?, Some(8));
    /// assert_eq!(r.bsearch(|x| 42 - x)?, Some(42));
    /// # Ok::<(), rust_ranges::Error>(())
    /// ```
    pub fn bsearch<R, F>(&self, predicate: F) -> Result<Option<T>>
    where
        R: IntoProbe,
        F: FnMut(T) -> R,
    {
        self.searcher()?.find(predicate)
    }
}

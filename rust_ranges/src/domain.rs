//! Capabilities of the values used as range endpoints.
//!
//! A range only needs its values to be (partially) ordered for membership
//! and containment tests.  Enumeration needs a [`Successor`], stepping needs
//! [`Addable`], and binary search needs a numeric view through
//! [`Ordered::as_numeric`].

use crate::comparison::{compare, Comparison};
use crate::errors::{Error, Result};
use crate::numeric::Numeric;

/// Values that can be used as the bounds of a range.
pub trait Ordered: PartialOrd + Clone + std::fmt::Debug {
    /// Name of the type of this value, used in error messages.
    fn type_name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Strict equality.  This might be stricter than `==` (for instance
    /// `1 == 1.0`, but they are not `eql`).
    fn eql(&self, other: &Self) -> bool {
        self == other
    }

    /// Ordering used when walking from one value to the next with
    /// [`Successor::succ`] or [`Addable::offset`], to decide whether we went
    /// past the end of the range.  This is the natural ordering, except for
    /// text.
    fn walk_cmp(&self, other: &Self) -> Comparison {
        compare(self, other)
    }

    /// The value as an integer, when it is one.
    fn as_integer(&self) -> Option<i64> {
        None
    }

    /// The value as a number, for numeric domains.
    fn as_numeric(&self) -> Option<Numeric> {
        None
    }

    /// Convert back from a number.  Returns None if the number cannot be
    /// represented in this domain.
    fn from_numeric(value: Numeric) -> Option<Self> {
        let _ = value;
        None
    }

    /// The largest value strictly less than self, for integer-like domains.
    fn pred(&self) -> Option<Self> {
        None
    }
}

/// Values that have a well-defined next value.
pub trait Successor: Ordered {
    /// The next value.  None if there is none (the end of the domain was
    /// reached).
    fn succ(&self) -> Option<Self>;

    /// Whether enumeration can start from this value.  For instance, a
    /// numeric domain has a successor for integers, but not for floats.
    fn is_discrete(&self) -> bool {
        true
    }
}

/// Values to which a numeric step can be added.
pub trait Addable: Ordered {
    /// Compute `self + step * count`.
    fn offset(&self, step: &Numeric, count: u64) -> Result<Self>;
}

/// Apply `succ` repeatedly, as a way to add an integer step to values
/// (like text) that have no addition.
pub(crate) fn succ_times<T: Successor>(
    value: &T,
    step: &Numeric,
    count: u64,
) -> Result<T> {
    let times = match step {
        Numeric::Float(_) => {
            return Err(Error::Type(format!(
                "no implicit conversion of Float into Integer for a {} step",
                value.type_name(),
            )))
        }
        Numeric::Int(n) if *n < 0 => {
            return Err(Error::Argument("step can't be negative".into()))
        }
        Numeric::Int(n) => (*n as u64).checked_mul(count).ok_or_else(|| {
            Error::Boundary(format!("step {n} * {count} overflows"))
        })?,
    };

    let mut current = value.clone();
    for _ in 0..times {
        current = current.succ().ok_or_else(|| {
            Error::Boundary(format!("no successor for {current:?}"))
        })?;
    }
    Ok(current)
}

macro_rules! integer_domain {
    ($($t:ty),*) => {
        $(
            impl Ordered for $t {
                fn as_integer(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }

                fn as_numeric(&self) -> Option<Numeric> {
                    self.as_integer().map(Numeric::Int)
                }

                fn from_numeric(value: Numeric) -> Option<Self> {
                    match value {
                        Numeric::Int(i) => <$t>::try_from(i).ok(),
                        Numeric::Float(_) => None,
                    }
                }

                fn pred(&self) -> Option<Self> {
                    self.checked_sub(1)
                }
            }

            impl Successor for $t {
                fn succ(&self) -> Option<Self> {
                    self.checked_add(1)
                }
            }

            impl Addable for $t {
                fn offset(&self, step: &Numeric, count: u64) -> Result<Self> {
                    let Numeric::Int(step) = step else {
                        return Err(Error::Type(format!(
                            "can't add a Float step to {}",
                            self.type_name(),
                        )));
                    };
                    i128::from(*step)
                        .checked_mul(i128::from(count))
                        .and_then(|delta| delta.checked_add(*self as i128))
                        .and_then(|v| <$t>::try_from(v).ok())
                        .ok_or_else(|| Error::Boundary(format!(
                            "{self} + {step} * {count} overflows {}",
                            self.type_name(),
                        )))
                }
            }
        )*
    };
}

integer_domain!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_domain {
    ($($t:ty),*) => {
        $(
            impl Ordered for $t {
                fn as_numeric(&self) -> Option<Numeric> {
                    Some(Numeric::Float(f64::from(*self)))
                }

                fn from_numeric(value: Numeric) -> Option<Self> {
                    Some(value.as_f64() as $t)
                }
            }

            impl Addable for $t {
                fn offset(&self, step: &Numeric, count: u64) -> Result<Self> {
                    Ok((f64::from(*self) + step.as_f64() * count as f64) as $t)
                }
            }
        )*
    };
}

float_domain!(f32, f64);

impl Ordered for char {}

impl Successor for char {
    fn succ(&self) -> Option<Self> {
        match *self {
            '\u{D7FF}' => Some('\u{E000}'), // skip surrogates
            c => char::from_u32(c as u32 + 1),
        }
    }
}

impl Addable for char {
    fn offset(&self, step: &Numeric, count: u64) -> Result<Self> {
        succ_times(self, step, count)
    }
}

use crate::domain::{Addable, Ordered, Successor};
use crate::errors::{Error, Result};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

// 2^63, the first float that no longer fits in an i64
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A number that is either an integer or a float.
/// Mixing the two promotes to float arithmetic, while comparisons between
/// an integer and a float are exact (no rounding of large integers).
#[derive(Clone, Copy)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Numeric::Int(_))
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Numeric::Float(_))
    }

    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Numeric::Int(i) => *i as f64,
            Numeric::Float(f) => *f,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Numeric::Int(i) => *i == 0,
            Numeric::Float(f) => *f == 0.0,
        }
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Numeric::Int(i) => *i < 0,
            Numeric::Float(f) => *f < 0.0,
        }
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        match self {
            Numeric::Int(_) => false,
            Numeric::Float(f) => f.is_nan(),
        }
    }

    /// Addition.  Two integers stay integers, and None is returned on
    /// overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Numeric) -> Option<Numeric> {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => {
                a.checked_add(*b).map(Numeric::Int)
            }
            (Numeric::Int(_) | Numeric::Float(_), _) => {
                Some(Numeric::Float(self.as_f64() + other.as_f64()))
            }
        }
    }

    /// Multiplication by a count.
    #[must_use]
    pub fn checked_mul(&self, count: u64) -> Option<Numeric> {
        match self {
            Numeric::Int(a) => i64::try_from(count)
                .ok()
                .and_then(|c| a.checked_mul(c))
                .map(Numeric::Int),
            Numeric::Float(f) => Some(Numeric::Float(f * count as f64)),
        }
    }

    /// `self + step * count`, which is how stepped iteration computes its
    /// elements.  Floats are computed with a single multiplication, so that
    /// errors do not accumulate.
    #[must_use]
    pub fn checked_offset(&self, step: &Numeric, count: u64) -> Option<Numeric> {
        step.checked_mul(count).and_then(|delta| self.checked_add(&delta))
    }

    /// Strict equality: an integer is never `eql` to a float, even when
    /// they compare equal.
    #[must_use]
    pub fn eql(&self, other: &Numeric) -> bool {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a == b,
            (Numeric::Float(a), Numeric::Float(b)) => a == b,
            (Numeric::Int(_), Numeric::Float(_))
            | (Numeric::Float(_), Numeric::Int(_)) => false,
        }
    }
}

/// Exact comparison between an integer and a float
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        None
    } else if f >= I64_LIMIT {
        Some(Ordering::Less)
    } else if f < -I64_LIMIT {
        Some(Ordering::Greater)
    } else {
        let t = f.trunc();
        match i.cmp(&(t as i64)) {
            Ordering::Equal => 0.0_f64.partial_cmp(&(f - t)),
            o => Some(o),
        }
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(b)),
            (Numeric::Float(a), Numeric::Float(b)) => a.partial_cmp(b),
            (Numeric::Int(a), Numeric::Float(b)) => cmp_int_float(*a, *b),
            (Numeric::Float(a), Numeric::Int(b)) => {
                cmp_int_float(*b, *a).map(Ordering::reverse)
            }
        }
    }
}

impl PartialEq<i64> for Numeric {
    fn eq(&self, other: &i64) -> bool {
        *self == Numeric::Int(*other)
    }
}

impl PartialOrd<i64> for Numeric {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.partial_cmp(&Numeric::Int(*other))
    }
}

impl PartialEq<f64> for Numeric {
    fn eq(&self, other: &f64) -> bool {
        *self == Numeric::Float(*other)
    }
}

impl PartialOrd<f64> for Numeric {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&Numeric::Float(*other))
    }
}

impl Hash for Numeric {
    /// Integral floats hash like the corresponding integer, since they
    /// compare equal to it.
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Numeric::Int(i) => i.hash(state),
            Numeric::Float(f) => {
                if f.fract() == 0.0 && *f >= -I64_LIMIT && *f < I64_LIMIT {
                    (*f as i64).hash(state)
                } else {
                    f.to_bits().hash(state)
                }
            }
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<u32> for Numeric {
    fn from(value: u32) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeric::Int(i) => write!(f, "{i}"),
            Numeric::Float(v) if v.is_nan() => write!(f, "NaN"),
            Numeric::Float(v) if v.is_infinite() => {
                if *v > 0.0 {
                    write!(f, "Infinity")
                } else {
                    write!(f, "-Infinity")
                }
            }
            //  always show a decimal point, so that floats parse back as floats
            Numeric::Float(v) if v.fract() == 0.0 => {
                write!(f, "{v:.1}")
            }
            Numeric::Float(v) => write!(f, "{v}"),
        }
    }
}

impl std::fmt::Debug for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

fn looks_integral(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl std::str::FromStr for Numeric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Infinity" | "+Infinity" => Ok(Numeric::Float(f64::INFINITY)),
            "-Infinity" => Ok(Numeric::Float(f64::NEG_INFINITY)),
            "NaN" => Ok(Numeric::Float(f64::NAN)),
            _ => match s.parse::<i64>() {
                Ok(i) => Ok(Numeric::Int(i)),
                // Integer text out of range is not turned into a float
                Err(e) if looks_integral(s) => Err(e.into()),
                Err(_) => Ok(Numeric::Float(s.parse::<f64>()?)),
            },
        }
    }
}

impl Ordered for Numeric {
    fn type_name(&self) -> &'static str {
        match self {
            Numeric::Int(_) => "Integer",
            Numeric::Float(_) => "Float",
        }
    }

    fn eql(&self, other: &Self) -> bool {
        Numeric::eql(self, other)
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            Numeric::Int(i) => Some(*i),
            Numeric::Float(_) => None,
        }
    }

    fn as_numeric(&self) -> Option<Numeric> {
        Some(*self)
    }

    fn from_numeric(value: Numeric) -> Option<Self> {
        Some(value)
    }

    fn pred(&self) -> Option<Self> {
        match self {
            Numeric::Int(i) => i.checked_sub(1).map(Numeric::Int),
            Numeric::Float(_) => None,
        }
    }
}

impl Successor for Numeric {
    fn succ(&self) -> Option<Self> {
        match self {
            Numeric::Int(i) => i.checked_add(1).map(Numeric::Int),
            Numeric::Float(_) => None,
        }
    }

    fn is_discrete(&self) -> bool {
        self.is_integer()
    }
}

impl Addable for Numeric {
    fn offset(&self, step: &Numeric, count: u64) -> Result<Self> {
        self.checked_offset(step, count).ok_or_else(|| {
            Error::Boundary(format!("{self} + {step} * {count} overflows"))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(n: &Numeric) -> u64 {
        let mut h = DefaultHasher::new();
        n.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_compare() {
        assert!(Numeric::Int(1) < Numeric::Float(1.5));
        assert!(Numeric::Float(1.5) < Numeric::Int(2));
        assert_eq!(Numeric::Int(1), Numeric::Float(1.0));
        assert!(Numeric::Int(1) != Numeric::Float(f64::NAN));
        assert_eq!(Numeric::Int(1).partial_cmp(&Numeric::Float(f64::NAN)), None);
        assert!(Numeric::Int(i64::MAX) < Numeric::Float(f64::INFINITY));
        assert!(Numeric::Int(i64::MIN) > Numeric::Float(f64::NEG_INFINITY));
        assert!(Numeric::Int(-3) > Numeric::Float(-3.5));
        assert!(Numeric::Int(-3) < Numeric::Float(-2.5));

        // large integers are not rounded to the nearest float
        assert!(Numeric::Int(9_007_199_254_740_993) > Numeric::Float(9_007_199_254_740_992.0));

        assert!(Numeric::Int(3) < 4_i64);
        assert!(Numeric::Int(3) > 2.5_f64);
    }

    #[test]
    fn test_eql_and_hash() {
        assert!(!Numeric::Int(1).eql(&Numeric::Float(1.0)));
        assert!(Numeric::Int(1).eql(&Numeric::Int(1)));
        assert_eq!(hash_of(&Numeric::Int(1)), hash_of(&Numeric::Float(1.0)));
        assert_eq!(hash_of(&Numeric::Int(0)), hash_of(&Numeric::Float(-0.0)));
        assert_ne!(hash_of(&Numeric::Float(1.5)), hash_of(&Numeric::Int(1)));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(
            Numeric::Int(1).checked_add(&Numeric::Int(2)),
            Some(Numeric::Int(3))
        );
        assert!(Numeric::Int(1)
            .checked_add(&Numeric::Float(0.5))
            .is_some_and(|n| n.is_float() && n == 1.5));
        assert_eq!(Numeric::Int(i64::MAX).checked_add(&Numeric::Int(1)), None);
        assert_eq!(
            Numeric::Int(1).checked_offset(&Numeric::Int(3), 4),
            Some(Numeric::Int(13))
        );
        assert!(Numeric::Float(1.0)
            .checked_offset(&Numeric::Float(0.1), 3)
            .is_some_and(|n| (n.as_f64() - 1.3).abs() < 1e-12));
        assert!(Numeric::Int(i64::MAX).offset(&Numeric::Int(1), 1).is_err());
    }

    #[test]
    fn test_io() -> Result<()> {
        assert_eq!(Numeric::Int(5).to_string(), "5");
        assert_eq!(Numeric::Float(5.0).to_string(), "5.0");
        assert_eq!(Numeric::Float(2.5).to_string(), "2.5");
        assert_eq!(Numeric::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Numeric::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(format!("{:?}", Numeric::Float(-1.0)), "-1.0");

        assert!("5".parse::<Numeric>()?.eql(&Numeric::Int(5)));
        assert!("5.0".parse::<Numeric>()?.eql(&Numeric::Float(5.0)));
        assert!("-Infinity".parse::<Numeric>()?.eql(&Numeric::Float(f64::NEG_INFINITY)));
        assert!("abc".parse::<Numeric>().is_err());
        assert!(matches!(
            "99999999999999999999".parse::<Numeric>(),
            Err(Error::ParseIntError(_))
        ));
        assert!(matches!("1.5x".parse::<Numeric>(), Err(Error::ParseFloatError(_))));
        assert!("1e20".parse::<Numeric>()?.eql(&Numeric::Float(1e20)));
        Ok(())
    }

    #[test]
    fn test_successor() {
        assert_eq!(Numeric::Int(4).succ(), Some(Numeric::Int(5)));
        assert_eq!(Numeric::Int(4).pred(), Some(Numeric::Int(3)));
        assert!(Numeric::Float(4.0).succ().is_none());
        assert!(!Numeric::Float(4.0).is_discrete());
        assert_eq!(Numeric::Int(4).type_name(), "Integer");
        assert_eq!(Numeric::Float(4.0).type_name(), "Float");
    }
}

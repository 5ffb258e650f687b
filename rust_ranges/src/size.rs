/// The number of elements of a range or of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Size {
    Finite(u64),

    /// The sequence never ends on its own.
    Unbounded,

    /// The size cannot be computed without enumerating.
    Unknown,
}

impl Size {
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self, Size::Finite(_))
    }

    #[must_use]
    pub fn finite(&self) -> Option<u64> {
        match self {
            Size::Finite(n) => Some(*n),
            Size::Unbounded | Size::Unknown => None,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::Finite(n) => write!(f, "{n}"),
            Size::Unbounded => write!(f, "Infinity"),
            Size::Unknown => write!(f, "nil"),
        }
    }
}

/// Number of elements in `from, from + step, ...` up to `to` (excluded when
/// `exclusive`).  Zero when the step goes away from `to`, and also for a
/// zero step, which callers reject earlier.
#[must_use]
pub fn integer_step_size(from: i64, to: i64, step: i64, exclusive: bool) -> u64 {
    let (mut delta, diff) = if step < 0 {
        (i128::from(from) - i128::from(to), -i128::from(step))
    } else {
        (i128::from(to) - i128::from(from), i128::from(step))
    };
    if diff == 0 {
        return 0;
    }
    if exclusive {
        delta -= 1;
    }
    if delta < 0 {
        return 0;
    }
    u64::try_from(delta / diff + 1).unwrap_or(u64::MAX)
}

/// Number of elements in `beg, beg + unit, ...` up to `end`, tolerating
/// rounding errors: an end that is within a few epsilons of an element is
/// considered to be that element.
#[must_use]
pub fn float_step_size(beg: f64, end: f64, unit: f64, exclusive: bool) -> Size {
    if unit.is_nan() || beg.is_nan() || end.is_nan() {
        return Size::Unknown;
    }
    if unit == 0.0 {
        return Size::Unbounded;
    }
    if unit.is_infinite() {
        let forward = if unit > 0.0 { beg <= end } else { beg >= end };
        return Size::Finite(u64::from(forward && (!exclusive || beg != end)));
    }

    let mut n = (end - beg) / unit;
    if n.is_nan() {
        return Size::Unknown;
    }
    if n.is_infinite() {
        return if n > 0.0 { Size::Unbounded } else { Size::Finite(0) };
    }

    let err = ((beg.abs() + end.abs() + (end - beg).abs()) / unit.abs()
        * f64::EPSILON)
        .min(0.5);

    if exclusive {
        if n <= 0.0 {
            return Size::Finite(0);
        }
        n = if n < 1.0 { 0.0 } else { (n - err).floor() };
        let d = (n + 1.0) * unit + beg;
        let before_end = if beg < end { d < end } else { d > end };
        if before_end {
            n += 1.0;
        }
    } else {
        if n < 0.0 {
            return Size::Finite(0);
        }
        n = (n + err).floor();
    }
    Size::Finite(n as u64 + 1)
}

//! Text as a range domain.
//!
//! Strings have a successor: the rightmost alphanumeric character is
//! incremented, carrying to the alphanumeric on its left when it wraps
//! (`"az"` is followed by `"ba"`, `"zz"` by `"aaa"` and `"1.9"` by `"2.0"`).
//! Since successive values grow in length, enumeration stops by comparing
//! lengths first, then text (shortlex ordering), rather than waiting to land
//! exactly on the high bound.

use crate::comparison::{compare, Comparison};
use crate::domain::{succ_times, Addable, Ordered, Successor};
use crate::errors::Result;
use crate::numeric::Numeric;
use crate::ranges::Range;
use std::borrow::Cow;

/// The text following `s`.
#[must_use]
pub fn succ_str(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    let Some(mut pos) =
        chars.iter().rposition(char::is_ascii_alphanumeric)
    else {
        // No alphanumeric, increment the last character
        if let Some(last) = chars.last_mut() {
            match last.succ() {
                Some(c) => *last = c,
                None => chars.push(char::MIN),
            }
        }
        return chars.into_iter().collect();
    };

    while let Some(c) = chars.get_mut(pos) {
        let (wrapped, carry) = match *c {
            'z' => ('a', 'a'),
            'Z' => ('A', 'A'),
            '9' => ('0', '1'),
            other => {
                *c = char::from(other as u8 + 1);
                break;
            }
        };
        *c = wrapped;

        match chars
            .get(..pos)
            .and_then(|head| head.iter().rposition(char::is_ascii_alphanumeric))
        {
            Some(p) => pos = p,
            None => {
                chars.insert(pos, carry);
                break;
            }
        }
    }
    chars.into_iter().collect()
}

/// Ordering by length first, then lexicographically.
fn shortlex(left: &str, right: &str) -> Comparison {
    match left.chars().count().cmp(&right.chars().count()) {
        std::cmp::Ordering::Equal => compare(left, right),
        o => Some(o).into(),
    }
}

impl Ordered for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn walk_cmp(&self, other: &Self) -> Comparison {
        shortlex(self, other)
    }
}

impl Ordered for &str {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn walk_cmp(&self, other: &Self) -> Comparison {
        shortlex(self, other)
    }
}

impl Successor for String {
    fn succ(&self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(succ_str(self))
        }
    }
}

impl Addable for String {
    fn offset(&self, step: &Numeric, count: u64) -> Result<Self> {
        succ_times(self, step, count)
    }
}

/// An interned-style name.  It behaves like text for ordering and
/// successors, but displays with a leading colon when inspected.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Symbol(name.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl std::str::FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Symbol::new(s.strip_prefix(':').unwrap_or(s)))
    }
}

impl Ordered for Symbol {
    fn type_name(&self) -> &'static str {
        "Symbol"
    }

    fn walk_cmp(&self, other: &Self) -> Comparison {
        shortlex(&self.0, &other.0)
    }
}

impl Successor for Symbol {
    fn succ(&self) -> Option<Self> {
        self.0.succ().map(Symbol)
    }
}

impl Addable for Symbol {
    fn offset(&self, step: &Numeric, count: u64) -> Result<Self> {
        succ_times(self, step, count)
    }
}

/// Loose conversion to text, for membership tests that accept anything
/// that looks like a string.
pub trait ToText {
    /// None when the value has no textual form.
    fn to_text(&self) -> Option<Cow<'_, str>>;
}

impl ToText for str {
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl ToText for String {
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl ToText for Symbol {
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl ToText for char {
    fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.to_string()))
    }
}

impl<T: ToText + ?Sized> ToText for &T {
    fn to_text(&self) -> Option<Cow<'_, str>> {
        (**self).to_text()
    }
}

fn single_ascii(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Some(c),
        _ => None,
    }
}

impl<T: Ordered + ToText> Range<T> {
    /// Whether the text form of `value` is one of the values of the range,
    /// once both bounds are also converted to text.  Ranges whose bounds
    /// are single ASCII characters only contain single characters.  Any
    /// failed conversion means the value is not included.
    #[must_use]
    pub fn include_text<V: ToText + ?Sized>(&self, value: &V) -> bool {
        let Some(value) = value.to_text() else {
            return false;
        };
        let low = match self.low.as_ref().map(ToText::to_text) {
            None => None,
            Some(None) => return false,
            Some(Some(t)) => Some(t.into_owned()),
        };
        let high = match self.high.as_ref().map(ToText::to_text) {
            None => None,
            Some(None) => return false,
            Some(Some(t)) => Some(t.into_owned()),
        };

        if let (Some(l), Some(h)) = (&low, &high) {
            if let (Some(l), Some(h)) = (single_ascii(l), single_ascii(h)) {
                return single_ascii(&value).is_some_and(|v| {
                    Range { low: Some(l), high: Some(h), exclusive: self.exclusive }
                        .member(&v)
                });
            }
        }

        let text = Range { low, high, exclusive: self.exclusive };
        if text.low.is_none() || text.high.is_none() {
            return text.member(&value.into_owned());
        }
        match text.each() {
            Ok(mut values) => values.any(|s| *s == *value),
            Err(_) => false,
        }
    }
}

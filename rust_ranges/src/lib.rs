//! This crate provides ranges of values, with an optional low bound, an
//! optional high bound, and a high bound that is either included or excluded.
//! The low bound, when present, is always included.
//!
//!  |Range    |Constructor                       |Description
//!  |---------|----------------------------------|--------------
//!  | `A..B`  |[`Range::inclusive`]              |both bounds included
//!  | `A...B` |[`Range::exclusive`]              |high bound excluded
//!  | `..B`   |[`Range::beginless`]`(B, false)`  |no low bound
//!  | `...B`  |[`Range::beginless`]`(B, true)`   |no low bound, high excluded
//!  | `A..`   |[`Range::endless`]`(A, false)`    |no high bound
//!  | `nil..nil`|[`Range::unbounded`]            |every value
//!
//! Any type can be used for the bounds, though operations on the range
//! depend on the traits that the bound type implements:
//!
//! * [`Ordered`] is enough to test membership ([`Range::member`],
//!   [`Range::covers`]), containment ([`Range::covers_range`]) and overlap,
//!   and to compute the size of integer ranges.  Values that cannot be
//!   compared with a bound (like NaN) are never members of the range.
//! * [`Successor`] is needed to enumerate the values ([`Range::each`],
//!   [`Range::reverse_each`]).  It is implemented for integers, chars, text,
//!   [`Symbol`] and [`Numeric`] (when the low bound is an integer).
//! * [`Addable`] is needed for [`Range::step`].
//! * Binary search ([`Range::bsearch`]) only works on numeric domains.
//!
//! [`Numeric`] mixes integers and floats in the same range, so that
//! `1..2.5` is a valid range.  Comparisons between integers and floats are
//! exact.
//!
//! Enumeration and stepping return a lazy [`Sequence`], which knows its
//! [`Size`] when it can be computed without enumerating:
//!
//! ```text
//!      0..6     step 2     0  2  4  6     size 4
//!      0...6    step 2     0  2  4        size 3
//!      6..0     step -2    6  4  2  0     size 4
//!      0..      step 2     0  2  4 ...    size Unbounded
//!      "a".."e" step 2     a  c  e        size Unknown
//! ```
//!
//! Enable the `chrono` feature to use `chrono::NaiveDate` as bounds.

mod bsearch;
mod comparison;
#[cfg(feature = "chrono")]
mod dates;
mod domain;
mod each;
mod errors;
mod numeric;
mod ranges;
mod sequence;
mod size;
mod slot;
mod step;
mod text;

pub use crate::bsearch::{IntoProbe, Probe, Searcher};
pub use crate::comparison::{compare, try_compare, Comparison};
pub use crate::domain::{Addable, Ordered, Successor};
pub use crate::each::{Each, ReverseEach};
pub use crate::errors::{Error, Result};
pub use crate::numeric::Numeric;
pub use crate::ranges::Range;
pub use crate::sequence::Sequence;
pub use crate::size::{float_step_size, integer_step_size, Size};
pub use crate::slot::RangeSlot;
pub use crate::step::Steps;
pub use crate::text::{succ_str, Symbol, ToText};

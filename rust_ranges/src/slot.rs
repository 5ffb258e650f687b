use crate::domain::Ordered;
use crate::errors::{Error, Result};
use crate::ranges::Range;

/// Storage for a range that is allocated before its bounds are known, and
/// initialized exactly once.
///
/// ```
/// use rust_ranges::RangeSlot;
/// let mut slot = RangeSlot::allocate();
/// slot.initialize(1, 10, false)?;
/// assert!(slot.get()?.member(&5));
/// assert!(slot.initialize(2, 3, false).is_err());
/// # Ok::<(), rust_ranges::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct RangeSlot<T> {
    range: Option<Range<T>>,
}

impl<T: Ordered> RangeSlot<T> {
    #[must_use]
    pub fn allocate() -> Self {
        Self { range: None }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.range.is_some()
    }

    /// Set the bounds.  They are checked as in [`Range::new`], and the slot
    /// is left uninitialized if they are invalid.
    pub fn initialize(&mut self, low: T, high: T, exclusive: bool) -> Result<&Range<T>> {
        if self.range.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        Ok(self.range.insert(Range::new(low, high, exclusive)?))
    }

    pub fn get(&self) -> Result<&Range<T>> {
        self.range.as_ref().ok_or(Error::Uninitialized)
    }

    pub fn into_range(self) -> Result<Range<T>> {
        self.range.ok_or(Error::Uninitialized)
    }
}

use crate::size::Size;

/// A lazily evaluated sequence of values, as returned by enumeration and
/// stepping when the caller does not consume the values right away.
///
/// Nothing is computed until values are requested.  The sequence keeps a
/// copy of its initial state, so that [`Sequence::rewind`] restarts it from
/// the beginning.
#[derive(Clone, Debug)]
pub struct Sequence<I> {
    origin: I,
    current: I,
    size: Size,
    consumed: u64,
}

impl<I: Iterator + Clone> Sequence<I> {
    pub(crate) fn new(iter: I, size: Size) -> Self {
        Self {
            origin: iter.clone(),
            current: iter,
            size,
            consumed: 0,
        }
    }

    /// The total number of elements of the sequence, independently of how
    /// many were already consumed.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Restart from the first element.
    pub fn rewind(&mut self) {
        self.current = self.origin.clone();
        self.consumed = 0;
    }
}

impl<I: Iterator> Iterator for Sequence<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current.next()?;
        self.consumed += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.size {
            Size::Finite(n) => {
                let left = usize::try_from(n.saturating_sub(self.consumed))
                    .unwrap_or(usize::MAX);
                (left, Some(left))
            }
            Size::Unbounded => (usize::MAX, None),
            Size::Unknown => self.current.size_hint(),
        }
    }
}

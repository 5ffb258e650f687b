use crate::comparison::{try_compare, Comparison};
use crate::domain::Successor;
use crate::errors::{Error, Result};
use crate::ranges::Range;
use crate::sequence::Sequence;
use crate::size::Size;

/// Enumerates the values of a range in increasing order, by applying the
/// successor function to the low bound.
#[derive(Clone, Debug)]
pub struct Each<T> {
    next: Option<T>,
    high: Option<T>,
    exclusive: bool,
}

impl<T: Successor> Iterator for Each<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if let Some(high) = &self.high {
            match current.walk_cmp(high) {
                Comparison::Less => {}
                Comparison::Equal => {
                    return if self.exclusive { None } else { Some(current) };
                }
                Comparison::Greater | Comparison::Incomparable => return None,
            }
        }
        self.next = current.succ();
        Some(current)
    }
}

#[derive(Clone, Debug)]
enum Backward<T> {
    /// Apply the predecessor function, down to `low` if there is one.
    Down { next: Option<T>, low: Option<T> },

    /// The values were computed forward, and are now returned in reverse
    /// order.
    Buffered(std::iter::Rev<std::vec::IntoIter<T>>),
}

/// Enumerates the values of a range in decreasing order.
#[derive(Clone, Debug)]
pub struct ReverseEach<T>(Backward<T>);

impl<T: Successor> Iterator for ReverseEach<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            Backward::Down { next, low } => {
                let current = next.take()?;
                if let Some(low) = low {
                    match current.walk_cmp(low) {
                        Comparison::Greater => {}
                        Comparison::Equal => return Some(current),
                        Comparison::Less | Comparison::Incomparable => {
                            return None
                        }
                    }
                }
                *next = current.pred();
                Some(current)
            }
            Backward::Buffered(values) => values.next(),
        }
    }
}

impl<T: Successor> Range<T> {
    /// The values of the range, in increasing order.  An endless range
    /// results in an infinite sequence.
    pub fn each(&self) -> Result<Sequence<Each<T>>> {
        let Some(low) = &self.low else {
            return Err(Error::Unsupported(
                "can't iterate from an absent low bound".into(),
            ));
        };
        if !low.is_discrete() {
            return Err(Error::Unsupported(format!(
                "can't iterate from {}",
                low.type_name()
            )));
        }
        if let Some(high) = &self.high {
            try_compare(low, high)?;
        }

        let next = if self.is_empty() {
            log::debug!("{self:?} is empty, nothing to enumerate");
            None
        } else {
            Some(low.clone())
        };
        Ok(Sequence::new(
            Each {
                next,
                high: self.high.clone(),
                exclusive: self.exclusive,
            },
            self.size(),
        ))
    }

    /// The values of the range, in decreasing order.  This requires a high
    /// bound.  A beginless range can only be enumerated backward on integer
    /// domains, in which case the sequence is infinite.
    pub fn reverse_each(&self) -> Result<Sequence<ReverseEach<T>>> {
        let Some(high) = &self.high else {
            return Err(Error::Unsupported(
                "can't iterate from an absent high bound".into(),
            ));
        };
        if self.is_unbounded_above() {
            return Err(Error::Unsupported(format!(
                "can't iterate backward from {high:?}"
            )));
        }
        let start = || {
            if self.exclusive {
                high.pred()
            } else {
                Some(high.clone())
            }
        };

        match &self.low {
            None if high.as_integer().is_some() => Ok(Sequence::new(
                ReverseEach(Backward::Down { next: start(), low: None }),
                Size::Unbounded,
            )),
            None => Err(Error::Unsupported(format!(
                "can't iterate backward from {}",
                high.type_name()
            ))),
            Some(low) if low.as_integer().is_some() && high.as_integer().is_some() => {
                let next = if self.is_empty() { None } else { start() };
                Ok(Sequence::new(
                    ReverseEach(Backward::Down { next, low: Some(low.clone()) }),
                    self.size(),
                ))
            }
            Some(_) => {
                log::debug!("{self:?}: enumerating forward before reversing");
                let values: Vec<T> = self.each()?.collect();
                Ok(Sequence::new(
                    ReverseEach(Backward::Buffered(values.into_iter().rev())),
                    self.size(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::numeric::Numeric;
    use crate::text::Symbol;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn ints(low: i64, high: i64, exclusive: bool) -> Range<Numeric> {
        Range::new(Numeric::Int(low), Numeric::Int(high), exclusive).unwrap()
    }

    #[test]
    fn test_each() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        assert_eq!(ints(1, 4, false).each()?.collect::<Vec<_>>(), vec![1_i64, 2, 3, 4]);
        assert_eq!(ints(1, 4, true).each()?.collect::<Vec<_>>(), vec![1_i64, 2, 3]);
        assert_eq!(ints(4, 4, false).each()?.count(), 1);
        assert_eq!(ints(4, 4, true).each()?.count(), 0);

        // Backward ranges are empty, and do not fail
        let backward = ints(4, 1, false);
        assert_eq!(backward.each()?.count(), 0);
        assert_eq!(backward.size(), Size::Finite(0));

        let r = Range::new(Numeric::Int(1), Numeric::Float(3.5), false)?;
        assert_eq!(r.each()?.collect::<Vec<_>>(), vec![1_i64, 2, 3]);

        let r = Range::endless(Numeric::Int(5), false);
        let seq = r.each()?;
        assert_eq!(seq.size(), Size::Unbounded);
        assert_eq!(seq.take(3).collect::<Vec<_>>(), vec![5_i64, 6, 7]);

        assert_eq!(Range::new(250_u8, 255, false)?.each()?.count(), 6);
        Ok(())
    }

    #[test]
    fn test_each_errors() -> Result<()> {
        assert!(matches!(
            Range::beginless(Numeric::Int(5), false).each(),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            Range::new(Numeric::Float(1.0), Numeric::Int(5), false)?.each(),
            Err(Error::Unsupported(msg)) if msg == "can't iterate from Float"
        ));
        assert!(matches!(
            Range::<Numeric>::unbounded(false).each(),
            Err(Error::Unsupported(_))
        ));
        Ok(())
    }

    #[test]
    fn test_each_text() -> Result<()> {
        let r = Range::new("a".to_string(), "e".to_string(), false)?;
        assert_eq!(r.each()?.collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(r.each()?.size(), Size::Unknown);

        let r = Range::new("y".to_string(), "ab".to_string(), false)?;
        assert_eq!(r.each()?.count(), 0, "lexicographically backward");

        let r = Range::new("az".to_string(), "bc".to_string(), true)?;
        assert_eq!(r.each()?.collect::<Vec<_>>(), vec!["az", "ba", "bb"]);

        let r = Range::new("a".to_string(), "zz".to_string(), false)?;
        assert_eq!(r.each()?.count(), 26 + 26 * 26);

        // "b" is never reached, since the length only grows
        let r = Range::new("zy".to_string(), "b".to_string(), false)?;
        assert_eq!(r.each()?.count(), 0);

        let r = Range::new(Symbol::new("a"), Symbol::new("c"), false)?;
        assert_eq!(r.each()?.count(), 3);

        let r = Range::new('x', 'z', true)?;
        assert_eq!(r.each()?.collect::<String>(), "xy");
        Ok(())
    }

    #[test]
    fn test_rewind() -> Result<()> {
        let mut seq = ints(1, 3, false).each()?;
        assert_eq!(seq.next(), Some(Numeric::Int(1)));
        seq.rewind();
        assert_eq!(seq.collect::<Vec<_>>(), vec![1_i64, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_reverse_each() -> Result<()> {
        assert_eq!(
            ints(1, 5, false).reverse_each()?.collect::<Vec<_>>(),
            vec![5_i64, 4, 3, 2, 1]
        );
        assert_eq!(
            ints(1, 5, true).reverse_each()?.collect::<Vec<_>>(),
            vec![4_i64, 3, 2, 1]
        );
        assert_eq!(ints(5, 1, false).reverse_each()?.count(), 0);
        assert_eq!(ints(5, 5, true).reverse_each()?.count(), 0);
        assert_eq!(Range::new(0_u8, 2, false)?.reverse_each()?.count(), 3);

        let r = Range::beginless(Numeric::Int(3), true);
        let seq = r.reverse_each()?;
        assert_eq!(seq.size(), Size::Unbounded);
        assert_eq!(seq.take(3).collect::<Vec<_>>(), vec![2_i64, 1, 0]);

        assert_eq!(
            Range::new('a', 'd', false)?.reverse_each()?.collect::<String>(),
            "dcba"
        );
        let r = Range::new(Numeric::Int(1), Numeric::Float(3.5), false)?;
        assert_eq!(r.reverse_each()?.collect::<Vec<_>>(), vec![3_i64, 2, 1]);

        assert!(matches!(
            Range::endless(Numeric::Int(1), false).reverse_each(),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            Range::beginless('z', false).reverse_each(),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            Range::beginless(Numeric::Float(1.5), false).reverse_each(),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            Range::new(Numeric::Int(0), Numeric::Float(f64::INFINITY), false)?
                .reverse_each(),
            Err(Error::Unsupported(_))
        ));
        Ok(())
    }

    #[test]
    fn test_each_matches_size() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..300 {
            let r = ints(
                rng.gen_range(-20..20),
                rng.gen_range(-20..20),
                rng.gen_bool(0.5),
            );
            let count = r.each()?.count() as u64;
            assert_eq!(Size::Finite(count), r.size(), "{r:?}");
            assert_eq!(r.reverse_each()?.count() as u64, count, "{r:?}");
            assert_eq!(r.count()?, Size::Finite(count));
        }
        Ok(())
    }
}

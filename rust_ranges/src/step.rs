use crate::comparison::{compare, Comparison};
use crate::domain::Addable;
use crate::errors::{Error, Result};
use crate::numeric::Numeric;
use crate::ranges::Range;
use crate::sequence::Sequence;
use crate::size::{float_step_size, integer_step_size, Size};

#[derive(Clone, Debug)]
enum State<T> {
    Done,

    /// A single value left
    Once(T),

    /// Repeatedly add the step to the current value
    Additive {
        next: T,
        step: Numeric,
        high: Option<T>,
        exclusive: bool,
        descending: bool,
    },

    /// Compute `base + index * step`, for floats, so that rounding errors
    /// do not accumulate.  The number of values is computed up front.
    Scaled {
        base: T,
        step: Numeric,
        index: u64,
        count: Option<u64>,
        high: Option<T>,
    },
}

/// Iterates over a range by adding a fixed step.
#[derive(Clone, Debug)]
pub struct Steps<T>(State<T>);

impl<T: Addable> Iterator for Steps<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.0, State::Done) {
            State::Done => None,
            State::Once(value) => Some(value),
            State::Additive { next, step, high, exclusive, descending } => {
                if let Some(h) = &high {
                    let c = next.walk_cmp(h);
                    match if descending { c.reverse() } else { c } {
                        Comparison::Less => {}
                        Comparison::Equal => {
                            return if exclusive { None } else { Some(next) };
                        }
                        Comparison::Greater | Comparison::Incomparable => {
                            return None
                        }
                    }
                }
                match next.offset(&step, 1) {
                    Ok(following) => {
                        self.0 = State::Additive {
                            next: following,
                            step,
                            high,
                            exclusive,
                            descending,
                        };
                    }
                    Err(e) => log::debug!("stepping stops after {next:?}: {e}"),
                }
                Some(next)
            }
            State::Scaled { base, step, index, count, high } => {
                if count.is_some_and(|c| index >= c) {
                    return None;
                }
                let mut value = match base.offset(&step, index) {
                    Ok(v) => v,
                    Err(e) => {
                        log::debug!("stepping stops at index {index}: {e}");
                        return None;
                    }
                };

                // Rounding errors must not take us past the high bound
                if let Some(h) = &high {
                    let overshoot = if step.is_negative() {
                        Comparison::Less
                    } else {
                        Comparison::Greater
                    };
                    if compare(&value, h) == overshoot {
                        value = h.clone();
                    }
                }

                self.0 = State::Scaled { base, step, index: index + 1, count, high };
                Some(value)
            }
        }
    }
}

impl<T: Addable> Range<T> {
    /// Iterate from the low bound, adding `step` each time, while the value
    /// remains in the range.  A negative step iterates downward, from a low
    /// bound greater than the high bound.
    ///
    /// Text is stepped by applying its successor function `step` times.
    /// Floats are computed by multiplication rather than repeated additions.
    pub fn step(&self, step: Numeric) -> Result<Sequence<Steps<T>>> {
        let Some(low) = &self.low else {
            return Err(Error::Unsupported(
                "can't iterate from an absent low bound".into(),
            ));
        };
        let low_num = low.as_numeric();
        let high_num = self.high.as_ref().and_then(|h| h.as_numeric());

        if step.is_nan() {
            return Err(Error::Argument("step can't be NaN".into()));
        }
        if step.is_zero() {
            if low_num.is_some() {
                return Err(Error::Argument("step can't be 0".into()));
            }
            let state = if self.member(low) {
                State::Once(low.clone())
            } else {
                State::Done
            };
            return Ok(Sequence::new(Steps(state), Size::Unknown));
        }

        let second = match low.offset(&step, 1) {
            Ok(v) => Some(v),
            Err(Error::Boundary(msg)) => {
                log::debug!("{msg}");
                None
            }
            Err(e) => return Err(e),
        };

        let size = self.step_size(&step, low_num, high_num);
        let floats = low_num.is_some()
            && (step.is_float()
                || low_num.is_some_and(|n| n.is_float())
                || high_num.is_some_and(|n| n.is_float()));

        let state = if floats {
            // Any float involved makes every value a float
            let base = low_num
                .and_then(|n| T::from_numeric(Numeric::Float(n.as_f64())))
                .unwrap_or_else(|| low.clone());
            State::Scaled {
                base,
                step,
                index: 0,
                count: match size {
                    Size::Finite(n) => Some(n),
                    Size::Unbounded => None,
                    Size::Unknown => Some(0),
                },
                high: self.high.clone(),
            }
        } else {
            match second {
                None if self.member(low) => State::Once(low.clone()),
                None => State::Done,
                Some(second) => {
                    let step_dir = compare(low, &second);
                    let range_dir = self
                        .high
                        .as_ref()
                        .map_or(Comparison::Less, |h| compare(low, h));
                    match (step_dir, range_dir) {
                        (Comparison::Equal, _) if self.member(low) => {
                            State::Once(low.clone())
                        }
                        (Comparison::Less, Comparison::Less | Comparison::Equal)
                        | (Comparison::Greater, Comparison::Greater | Comparison::Equal) => {
                            State::Additive {
                                next: low.clone(),
                                step,
                                high: self.high.clone(),
                                exclusive: self.exclusive,
                                descending: step_dir == Comparison::Greater,
                            }
                        }
                        (Comparison::Less, Comparison::Greater)
                        | (Comparison::Greater, Comparison::Less)
                        | (Comparison::Equal | Comparison::Incomparable, _)
                        | (_, Comparison::Incomparable) => {
                            log::debug!("{self:?} goes against step {step}");
                            State::Done
                        }
                    }
                }
            }
        };
        Ok(Sequence::new(Steps(state), size))
    }

    /// Same as [`Range::step`], with a step of 1 for numeric ranges.
    pub fn step_unit(&self) -> Result<Sequence<Steps<T>>> {
        match &self.low {
            Some(low) if low.as_numeric().is_none() => Err(Error::Argument(
                format!("step is required for {} ranges", low.type_name()),
            )),
            Some(_) | None => self.step(Numeric::Int(1)),
        }
    }

    fn step_size(
        &self,
        step: &Numeric,
        low: Option<Numeric>,
        high: Option<Numeric>,
    ) -> Size {
        if self.high.is_none() {
            // A numeric range can't be walked downward from its low bound
            return if low.is_some() && step.is_negative() {
                Size::Finite(0)
            } else {
                Size::Unbounded
            };
        }
        match (low, high, step) {
            (Some(Numeric::Int(l)), Some(Numeric::Int(h)), Numeric::Int(s)) => {
                Size::Finite(integer_step_size(l, h, *s, self.exclusive))
            }
            (Some(l), Some(h), s) => {
                float_step_size(l.as_f64(), h.as_f64(), s.as_f64(), self.exclusive)
            }
            (None, _, _) | (_, None, _) => Size::Unknown,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::text::Symbol;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn ints(low: i64, high: i64, exclusive: bool) -> Range<Numeric> {
        Range::new(Numeric::Int(low), Numeric::Int(high), exclusive).unwrap()
    }

    fn floats(low: f64, high: f64, exclusive: bool) -> Range<Numeric> {
        Range::new(Numeric::Float(low), Numeric::Float(high), exclusive).unwrap()
    }

    fn floats_of(bound: Option<&Numeric>) -> f64 {
        bound.map_or(f64::NAN, Numeric::as_f64)
    }

    #[test]
    fn test_integers() -> Result<()> {
        // Scenario: inclusive and exclusive bound
        let seq = ints(0, 6, false).step(Numeric::Int(2))?;
        assert_eq!(seq.size(), Size::Finite(4));
        assert_eq!(seq.collect::<Vec<_>>(), vec![0_i64, 2, 4, 6]);
        let seq = ints(0, 6, true).step(Numeric::Int(2))?;
        assert_eq!(seq.size(), Size::Finite(3));
        assert_eq!(seq.collect::<Vec<_>>(), vec![0_i64, 2, 4]);

        assert_eq!(
            ints(10, 0, false).step(Numeric::Int(-3))?.collect::<Vec<_>>(),
            vec![10_i64, 7, 4, 1]
        );
        assert_eq!(
            ints(10, 1, true).step(Numeric::Int(-3))?.collect::<Vec<_>>(),
            vec![10_i64, 7, 4]
        );
        assert_eq!(ints(0, 10, false).step(Numeric::Int(-1))?.count(), 0);
        assert_eq!(ints(10, 0, false).step(Numeric::Int(1))?.count(), 0);
        assert_eq!(ints(3, 3, false).step(Numeric::Int(-2))?.count(), 1);

        assert_eq!(
            Range::new(i64::MAX - 1, i64::MAX, false)?
                .step(Numeric::Int(1))?
                .collect::<Vec<_>>(),
            vec![i64::MAX - 1, i64::MAX]
        );
        let seq = Range::new(250_u8, 255, false)?.step(Numeric::Int(10))?;
        assert_eq!(seq.size(), Size::Finite(1));
        assert_eq!(seq.collect::<Vec<_>>(), vec![250]);

        assert_eq!(
            ints(1, 4, false).step_unit()?.collect::<Vec<_>>(),
            vec![1_i64, 2, 3, 4]
        );
        Ok(())
    }

    #[test]
    fn test_floats() -> Result<()> {
        let seq = floats(1.0, 2.0, false).step(Numeric::Float(0.1))?;
        assert_eq!(seq.size(), Size::Finite(11));
        let values = seq.collect::<Vec<_>>();
        assert_eq!(values.len(), 11);
        assert!(values.last().is_some_and(|v| *v == 2.0));
        assert!(values.iter().all(|v| v.is_float()));

        let values =
            floats(1.0, 2.0, true).step(Numeric::Float(0.1))?.collect::<Vec<_>>();
        assert_eq!(values.len(), 10);
        assert!(values.last().is_some_and(|v| *v < 2.0));

        assert_eq!(
            ints(0, 1, false).step(Numeric::Float(0.25))?.collect::<Vec<_>>(),
            vec![0.0, 0.25, 0.5, 0.75, 1.0]
        );

        // An integer low and step, with a float high
        let values = Range::new(Numeric::Int(1), Numeric::Float(3.0), false)?
            .step(Numeric::Int(1))?
            .collect::<Vec<_>>();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert!(values.iter().all(Numeric::is_float));
        assert!(ints(0, 1, false)
            .step(Numeric::Float(0.5))?
            .all(|v| v.is_float()));
        assert_eq!(
            floats(2.0, 1.0, false).step(Numeric::Float(-0.5))?.collect::<Vec<_>>(),
            vec![2.0, 1.5, 1.0]
        );
        assert_eq!(floats(1.0, 2.0, false).step(Numeric::Float(-0.5))?.count(), 0);
        assert_eq!(
            floats(1.0, 2.0, false).step_unit()?.collect::<Vec<_>>(),
            vec![1.0, 2.0]
        );
        assert_eq!(
            Range::new(1.0_f64, 2.0, false)?.step(Numeric::Float(0.5))?.collect::<Vec<_>>(),
            vec![1.0, 1.5, 2.0]
        );
        assert!(matches!(
            Range::new(1_i32, 5, false)?.step(Numeric::Float(0.5)),
            Err(Error::Type(_))
        ));
        Ok(())
    }

    #[test]
    fn test_endless() -> Result<()> {
        let seq = Range::endless(Numeric::Int(1), false).step(Numeric::Int(3))?;
        assert_eq!(seq.size(), Size::Unbounded);
        assert_eq!(seq.take(3).collect::<Vec<_>>(), vec![1_i64, 4, 7]);

        let seq = Range::endless(Numeric::Float(1.0), true).step(Numeric::Float(0.5))?;
        assert_eq!(seq.size(), Size::Unbounded);
        assert_eq!(seq.take(3).collect::<Vec<_>>(), vec![1.0, 1.5, 2.0]);

        let seq = Range::endless("a".to_string(), false).step(Numeric::Int(2))?;
        assert_eq!(seq.take(3).collect::<Vec<_>>(), vec!["a", "c", "e"]);
        Ok(())
    }

    #[test]
    fn test_text() -> Result<()> {
        let r = Range::new("a".to_string(), "e".to_string(), false)?;
        let seq = r.step(Numeric::Int(2))?;
        assert_eq!(seq.size(), Size::Unknown);
        assert_eq!(seq.collect::<Vec<_>>(), vec!["a", "c", "e"]);
        assert_eq!(r.step(Numeric::Int(0))?.collect::<Vec<_>>(), vec!["a"]);
        assert!(matches!(r.step(Numeric::Int(-1)), Err(Error::Argument(_))));
        assert!(matches!(r.step(Numeric::Float(1.5)), Err(Error::Type(_))));
        assert!(matches!(r.step_unit(), Err(Error::Argument(_))));

        let r = Range::new("e".to_string(), "a".to_string(), false)?;
        assert_eq!(r.step(Numeric::Int(0))?.count(), 0);
        assert_eq!(r.step(Numeric::Int(1))?.count(), 0);

        let r = Range::new(Symbol::new("a"), Symbol::new("f"), true)?;
        assert_eq!(r.step(Numeric::Int(5))?.collect::<Vec<_>>(), vec![Symbol::new("a")]);

        let r = Range::new('a', 'e', false)?;
        assert_eq!(r.step(Numeric::Int(2))?.collect::<String>(), "ace");
        Ok(())
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Range::beginless(Numeric::Int(1), false).step(Numeric::Int(1)),
            Err(Error::Unsupported(_))
        ));
        assert!(matches!(
            ints(0, 5, false).step(Numeric::Int(0)),
            Err(Error::Argument(msg)) if msg == "step can't be 0"
        ));
        assert!(matches!(
            floats(0.0, 5.0, false).step(Numeric::Float(0.0)),
            Err(Error::Argument(_))
        ));
        assert!(matches!(
            ints(0, 5, false).step(Numeric::Float(f64::NAN)),
            Err(Error::Argument(_))
        ));
    }

    #[test]
    fn test_step_matches_size() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..300 {
            let r = ints(rng.gen_range(-30..30), rng.gen_range(-30..30), rng.gen_bool(0.5));
            let step = match rng.gen_range(-5_i64..5) {
                0 => 1,
                s => s,
            };
            let seq = r.step(Numeric::Int(step))?;
            let size = seq.size();
            assert_eq!(Size::Finite(seq.count() as u64), size, "{r:?} by {step}");
        }
        for _ in 0..300 {
            let r = floats(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_bool(0.5),
            );
            let step = rng.gen_range(0.1..3.0) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let seq = r.step(Numeric::Float(step))?;
            let size = seq.size();
            let values = seq.collect::<Vec<_>>();
            assert_eq!(Size::Finite(values.len() as u64), size, "{r:?} by {step}");
            let (low, high) = (floats_of(r.low()), floats_of(r.high()));
            let inside = |v: &Numeric| {
                let v = v.as_f64();
                let (from, to) = if step > 0.0 { (low, high) } else { (-low, -high) };
                let v = if step > 0.0 { v } else { -v };
                from <= v && if r.exclude_end() { v < to } else { v <= to }
            };
            assert!(values.iter().all(inside), "{r:?} by {step}");
        }
        Ok(())
    }
}

//! Calendar dates as a range domain.  Stepping adds whole days.

use crate::domain::{Addable, Ordered, Successor};
use crate::errors::{Error, Result};
use crate::numeric::Numeric;
use chrono::{Duration, NaiveDate};

impl Ordered for NaiveDate {
    fn type_name(&self) -> &'static str {
        "Date"
    }

    fn pred(&self) -> Option<Self> {
        self.pred_opt()
    }
}

impl Successor for NaiveDate {
    fn succ(&self) -> Option<Self> {
        self.succ_opt()
    }
}

impl Addable for NaiveDate {
    fn offset(&self, step: &Numeric, count: u64) -> Result<Self> {
        let Numeric::Int(days) = step else {
            return Err(Error::Type("can't add a Float step to a Date".into()));
        };
        i64::try_from(count)
            .ok()
            .and_then(|c| days.checked_mul(c))
            .and_then(Duration::try_days)
            .and_then(|d| self.checked_add_signed(d))
            .ok_or_else(|| {
                Error::Boundary(format!("{self} + {days} * {count} days overflows"))
            })
    }
}

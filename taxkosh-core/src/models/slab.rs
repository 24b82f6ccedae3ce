use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contiguous income band taxed at a single marginal rate.
///
/// `upper_bound` of `None` marks the open-ended final band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate_percent: Decimal,
}

impl Slab {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate_percent: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate_percent,
        }
    }
}

/// Errors raised when a slab schedule violates the coverage invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlabScheduleError {
    #[error("schedule has no slabs")]
    Empty,

    #[error("first slab must start at 0, got {0}")]
    NonZeroStart(Decimal),

    #[error("slab starting at {lower} does not continue from {expected}")]
    Gap { expected: Decimal, lower: Decimal },

    #[error("slab starting at {lower} has upper bound {upper} at or below it")]
    EmptySpan { lower: Decimal, upper: Decimal },

    #[error("only the final slab may be unbounded")]
    UnboundedBeforeEnd,

    #[error("final slab must be unbounded")]
    BoundedTail,

    #[error("rate {0} is outside 0..=100")]
    RateOutOfRange(Decimal),
}

/// An ordered set of slabs covering `[0, ∞)` with no gaps or overlaps.
///
/// The constructor enforces the invariant, so a value of this type can be
/// handed to the worksheets without further checking: slabs ascend from
/// zero, each one continues exactly where the previous ended, and only the
/// final slab is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlabSchedule {
    slabs: Vec<Slab>,
}

impl SlabSchedule {
    pub fn new(slabs: Vec<Slab>) -> Result<Self, SlabScheduleError> {
        let last = slabs.len().checked_sub(1).ok_or(SlabScheduleError::Empty)?;

        let mut expected = Decimal::ZERO;
        for (i, slab) in slabs.iter().enumerate() {
            if slab.rate_percent < Decimal::ZERO || slab.rate_percent > Decimal::ONE_HUNDRED {
                return Err(SlabScheduleError::RateOutOfRange(slab.rate_percent));
            }
            if slab.lower_bound != expected {
                if i == 0 {
                    return Err(SlabScheduleError::NonZeroStart(slab.lower_bound));
                }
                return Err(SlabScheduleError::Gap {
                    expected,
                    lower: slab.lower_bound,
                });
            }
            match slab.upper_bound {
                Some(upper) if upper <= slab.lower_bound => {
                    return Err(SlabScheduleError::EmptySpan {
                        lower: slab.lower_bound,
                        upper,
                    });
                }
                Some(upper) => {
                    if i == last {
                        return Err(SlabScheduleError::BoundedTail);
                    }
                    expected = upper;
                }
                None => {
                    if i != last {
                        return Err(SlabScheduleError::UnboundedBeforeEnd);
                    }
                }
            }
        }

        Ok(Self { slabs })
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Upper bound of the leading zero-rate band, i.e. the income level up
    /// to which no tax is due. Zero when the schedule taxes from the first
    /// rupee.
    pub fn basic_exemption_limit(&self) -> Decimal {
        match self.slabs.first() {
            Some(first) if first.rate_percent == Decimal::ZERO => {
                first.upper_bound.unwrap_or(Decimal::ZERO)
            }
            _ => Decimal::ZERO,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::clock::ClockTime;
use crate::errors::{BookingError, BookingResult};

/// A sub-range of the work window, `[start, end)`, in which nothing can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl BreakInterval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: ClockTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// A worker's recurring daily availability: a `[start, end)` window with zero
/// or more break intervals carved out of it.
///
/// Always valid once constructed. Breaks are kept sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkSchedule")]
pub struct WorkSchedule {
    start: ClockTime,
    end: ClockTime,
    breaks: Vec<BreakInterval>,
}

#[derive(Deserialize)]
struct RawWorkSchedule {
    start: ClockTime,
    end: ClockTime,
    #[serde(default)]
    breaks: Vec<BreakInterval>,
}

impl TryFrom<RawWorkSchedule> for WorkSchedule {
    type Error = BookingError;

    fn try_from(raw: RawWorkSchedule) -> Result<Self, Self::Error> {
        WorkSchedule::new(raw.start, raw.end, raw.breaks)
    }
}

impl WorkSchedule {
    /// Builds a schedule, failing with `InvalidSchedule` when the window is
    /// empty or inverted, a break is inverted or leaves the window, or two
    /// breaks overlap. Breaks that merely touch are accepted.
    pub fn new(
        start: ClockTime,
        end: ClockTime,
        mut breaks: Vec<BreakInterval>,
    ) -> BookingResult<Self> {
        if start >= end {
            return Err(BookingError::InvalidSchedule(format!(
                "work window {start}-{end} must start before it ends"
            )));
        }

        for b in &breaks {
            if b.start >= b.end {
                return Err(BookingError::InvalidSchedule(format!(
                    "break {}-{} must start before it ends",
                    b.start, b.end
                )));
            }
            if b.start < start || b.end > end {
                return Err(BookingError::InvalidSchedule(format!(
                    "break {}-{} lies outside the work window {start}-{end}",
                    b.start, b.end
                )));
            }
        }

        breaks.sort_by_key(|b| b.start);
        if let Some(pair) = breaks.windows(2).find(|pair| pair[0].end > pair[1].start) {
            return Err(BookingError::InvalidSchedule(format!(
                "breaks {}-{} and {}-{} overlap",
                pair[0].start, pair[0].end, pair[1].start, pair[1].end
            )));
        }

        Ok(Self { start, end, breaks })
    }

    /// Shorthand for the common one-break-per-day shape.
    pub fn with_single_break(
        start: ClockTime,
        end: ClockTime,
        break_start: ClockTime,
        break_end: ClockTime,
    ) -> BookingResult<Self> {
        Self::new(start, end, vec![BreakInterval::new(break_start, break_end)])
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn breaks(&self) -> &[BreakInterval] {
        &self.breaks
    }

    pub fn is_within_work_window(&self, time: ClockTime) -> bool {
        self.start <= time && time < self.end
    }

    pub fn is_during_break(&self, time: ClockTime) -> bool {
        self.breaks.iter().any(|b| b.contains(time))
    }
}

//! Display scale selection
//!
//! Charted values are divided down into a readable range. The tier is
//! picked from the peak of the per-day aggregate series; its axis ticks
//! are fixed per tier, never derived from the data.

use serde::Serialize;

const TICKS_0_TO_10: &[u32] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
const TICKS_0_TO_100: &[u32] = &[0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Display-unit tiers, ordered from smallest to largest magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Scale {
    UpToTen,
    UpToHundred,
    UpToThousand,
    OverThousand,
}

impl Scale {
    /// Unit suffix shown on the y-axis title.
    pub fn suffix(&self) -> &'static str {
        match self {
            Scale::UpToTen | Scale::UpToHundred => "USD",
            Scale::UpToThousand => "hundred USD",
            Scale::OverThousand => "thousand USD",
        }
    }

    /// Raw cost divided by this yields the plotted value.
    pub fn divisor(&self) -> f64 {
        match self {
            Scale::UpToTen => 0.1,
            Scale::UpToHundred => 1.0,
            Scale::UpToThousand => 10.0,
            Scale::OverThousand => 100.0,
        }
    }

    /// The literal y-axis tick values for this tier.
    pub fn y_axis_labels(&self) -> &'static [u32] {
        match self {
            Scale::UpToHundred => TICKS_0_TO_100,
            _ => TICKS_0_TO_10,
        }
    }

    /// Smallest tier whose range covers `max`.
    pub fn for_max(max: f64) -> Scale {
        if max <= 10.0 {
            Scale::UpToTen
        } else if max <= 100.0 {
            Scale::UpToHundred
        } else if max <= 1000.0 {
            Scale::UpToThousand
        } else {
            Scale::OverThousand
        }
    }
}

/// Pick the tier for a per-day aggregate series.
///
/// The series is read, never reordered; callers reuse it afterwards in
/// chronological order. An all-zero (or empty) series selects the
/// smallest tier.
pub fn select_scale(daily_totals: &[f64]) -> Scale {
    let max = daily_totals.iter().copied().fold(0.0f64, f64::max);
    Scale::for_max(max)
}

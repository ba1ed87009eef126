use super::*;

//
// Mode
//

/// Selects how per-axis bounds are tracked while samples are read.
#[derive(Serialize, Deserialize, clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    /// Starts unset, the first value sets both bounds.
    #[default]
    Observed,
    /// Starts from the inverted `(1, 0)` sentinel and treats a bound equal to
    /// zero as unset. A real zero on one bound re-triggers the first
    /// observation branch.
    Legacy,
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Observed => "observed",
                Self::Legacy => "legacy",
            }
        )
    }
}

//
// Range
//

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    pub const SENTINEL: Self = Self::new(1.0, 0.0);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    pub fn is_inverted(self) -> bool {
        self.min > self.max
    }

    /// Legacy update rule. Only one bound moves per call, and the opposite
    /// bound follows it when it still reads exactly zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn update(mut self, value: f64) -> Self {
        if value < self.min {
            self.min = value;
            if self.max == 0.0 {
                self.max = value;
            }
        } else if value > self.max {
            self.max = value;
            if self.min == 0.0 {
                self.min = value;
            }
        }
        self
    }

    /// Widens the range to contain `value`. NaN leaves it unchanged.
    #[must_use]
    pub fn add(self, value: f64) -> Self {
        Self::new(self.min.min(value), self.max.max(value))
    }

    /// Swaps the bounds of an inverted range.
    #[must_use]
    pub fn ordered(self) -> Self {
        if self.is_inverted() {
            Self::new(self.max, self.min)
        } else {
            self
        }
    }
}

impl fmt::Display for AxisRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

//
// Tracker
//

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeTracker {
    Observed(Option<AxisRange>),
    Legacy(AxisRange),
}

impl RangeTracker {
    pub fn new(mode: RangeMode) -> Self {
        match mode {
            RangeMode::Observed => Self::Observed(None),
            RangeMode::Legacy => Self::Legacy(AxisRange::SENTINEL),
        }
    }

    pub fn mode(&self) -> RangeMode {
        match self {
            Self::Observed(_) => RangeMode::Observed,
            Self::Legacy(_) => RangeMode::Legacy,
        }
    }

    pub fn add(&mut self, value: f64) {
        match self {
            Self::Observed(range) => {
                *range = Some(range.map_or(AxisRange::point(value), |range| range.add(value)));
            }
            Self::Legacy(range) => *range = range.update(value),
        }
    }

    /// Legacy trackers always report a range, even the untouched sentinel.
    pub fn range(&self) -> Option<AxisRange> {
        match *self {
            Self::Observed(range) => range,
            Self::Legacy(range) => Some(range),
        }
    }
}

//
// Tests
//

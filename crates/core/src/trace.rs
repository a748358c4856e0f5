#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One retained sample: a time and the captured values at that time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Simulation time of this sample.
    pub time: f64,

    /// Captured values, aligned with the owning trace's capture list.
    pub values: Vec<f64>,
}

/// The ordered time series produced by one integration run.
///
/// A trace is append-only: the solver records one [`Sample`] per retained
/// time point, in time order, and the caller owns the result. Each sample's
/// values are aligned with the capture list the trace was created with.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trace {
    captures: Vec<String>,
    samples: Vec<Sample>,
}

impl Trace {
    /// Creates an empty trace for the given capture list.
    #[must_use]
    pub fn new(captures: Vec<String>) -> Self {
        Self {
            captures,
            samples: Vec::new(),
        }
    }

    /// Appends one sample.
    ///
    /// `values` must be aligned with the capture list; the solver produces
    /// them in capture order.
    pub fn record(&mut self, time: f64, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.captures.len());
        self.samples.push(Sample { time, values });
    }

    /// The ordered list of captured names.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// All recorded samples, in time order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The most recent sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// The number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Projects one captured variable into `[time, value]` pairs.
    ///
    /// Returns `None` if the name is not in the capture list. The result is
    /// ready to hand to a plotting backend.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<Vec<[f64; 2]>> {
        let index = self.captures.iter().position(|capture| capture == name)?;

        Some(
            self.samples
                .iter()
                .map(|sample| [sample.time, sample.values[index]])
                .collect(),
        )
    }
}
